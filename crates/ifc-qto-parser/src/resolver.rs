// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! EntityResolver trait implementation

use ifc_qto_model::{DecodedEntity, EntityId, EntityResolver, IfcType, ParseError, Result};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Entity resolver over a fully decoded DATA section
pub struct ResolverImpl {
    /// Entity ID -> decoded entity
    entities: FxHashMap<EntityId, Arc<DecodedEntity>>,
    /// Entity IDs in file order
    order: Vec<EntityId>,
    /// Type -> entity IDs index, each in file order
    type_index: FxHashMap<IfcType, Vec<EntityId>>,
}

impl ResolverImpl {
    /// Index decoded entities, rejecting duplicate instance ids
    pub fn new(decoded: Vec<DecodedEntity>) -> Result<Self> {
        let mut entities = FxHashMap::default();
        let mut order = Vec::with_capacity(decoded.len());
        let mut type_index: FxHashMap<IfcType, Vec<EntityId>> = FxHashMap::default();

        entities.reserve(decoded.len());

        for entity in decoded {
            let id = entity.id;
            type_index
                .entry(entity.ifc_type.clone())
                .or_default()
                .push(id);
            if entities.insert(id, Arc::new(entity)).is_some() {
                return Err(ParseError::DuplicateEntity(id));
            }
            order.push(id);
        }

        Ok(Self {
            entities,
            order,
            type_index,
        })
    }

    /// Entities in file order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<DecodedEntity>> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }
}

impl EntityResolver for ResolverImpl {
    fn get(&self, id: EntityId) -> Option<Arc<DecodedEntity>> {
        self.entities.get(&id).cloned()
    }

    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<Arc<DecodedEntity>> {
        self.type_index
            .get(ifc_type)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    fn products(&self) -> Vec<Arc<DecodedEntity>> {
        self.iter()
            .filter(|e| e.ifc_type.is_product())
            .cloned()
            .collect()
    }

    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.type_index.get(ifc_type).map(|v| v.len()).unwrap_or(0)
    }

    fn entity_count(&self) -> usize {
        self.order.len()
    }
}
