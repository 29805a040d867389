// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ParsedModel - Main IFC model implementation

use crate::decoder::decode_entities;
use crate::relations::RelationIndex;
use crate::resolver::ResolverImpl;
use crate::scanner::{locate_sections, parse_header};
use crate::units::{extract_unit_scales, UnitScales};

use ifc_qto_model::{
    DecodedEntity, EntityId, EntityResolver, IfcModel, ModelMetadata, RelationshipKind, Result,
    UnitCategory,
};
use std::sync::Arc;
use tracing::debug;

/// Parsed IFC model implementing the `IfcModel` trait
///
/// Owns every decoded entity plus the indices built over them at open time.
pub struct ParsedModel {
    resolver: ResolverImpl,
    relations: RelationIndex,
    units: UnitScales,
    metadata: ModelMetadata,
}

impl ParsedModel {
    /// Parse raw file bytes and build the model
    ///
    /// Invalid UTF-8 is replaced rather than rejected; a leading byte order
    /// mark is ignored.
    pub fn parse(content: &[u8]) -> Result<Self> {
        let decoded = String::from_utf8_lossy(content);
        let text: &str = &decoded;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let sections = locate_sections(text)?;
        let metadata = parse_header(text, sections.header)?.into_metadata()?;

        let resolver = ResolverImpl::new(decode_entities(text, sections.data)?)?;
        let relations = RelationIndex::build(&resolver);
        let units = extract_unit_scales(&resolver);

        debug!(
            schema = %metadata.schema_version,
            entities = resolver.entity_count(),
            "parsed IFC model"
        );

        Ok(Self {
            resolver,
            relations,
            units,
            metadata,
        })
    }
}

impl IfcModel for ParsedModel {
    fn resolver(&self) -> &dyn EntityResolver {
        &self.resolver
    }

    fn relationships(&self, id: EntityId, kind: RelationshipKind) -> Vec<Arc<DecodedEntity>> {
        self.relations.lookup(&self.resolver, id, kind)
    }

    fn unit_scale(&self, category: UnitCategory) -> f64 {
        self.units.get(category)
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
