// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inverse relationship index
//!
//! Built once per model by walking every relationship record of the indexed
//! kinds. Lookups return relationships in file order.

use crate::resolver::ResolverImpl;
use ifc_qto_model::{DecodedEntity, EntityId, EntityResolver, RelationshipKind};
use rustc_hash::FxHashMap;
use std::sync::Arc;

pub struct RelationIndex {
    inverse: FxHashMap<(RelationshipKind, EntityId), Vec<EntityId>>,
}

impl RelationIndex {
    pub fn build(resolver: &ResolverImpl) -> Self {
        let mut inverse: FxHashMap<(RelationshipKind, EntityId), Vec<EntityId>> =
            FxHashMap::default();

        for kind in RelationshipKind::ALL {
            for rel in resolver.entities_by_type(&kind.relationship_type()) {
                for related in rel.attribute_refs(kind.related_attribute()) {
                    inverse.entry((kind, related)).or_default().push(rel.id);
                }
            }
        }

        Self { inverse }
    }

    pub fn lookup(
        &self,
        resolver: &ResolverImpl,
        id: EntityId,
        kind: RelationshipKind,
    ) -> Vec<Arc<DecodedEntity>> {
        self.inverse
            .get(&(kind, id))
            .map(|rels| rels.iter().filter_map(|rel| resolver.get(*rel)).collect())
            .unwrap_or_default()
    }
}
