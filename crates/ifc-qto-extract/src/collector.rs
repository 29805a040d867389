// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element collection
//!
//! Two sweeps build the records: a curated sweep over common structural
//! classes, then a catch-all sweep over every remaining physical product.
//! Each element is emitted once.

use crate::quantities::{fallback_geometry_volume, VolumeResolver};
use crate::record::ElementRecord;
use crate::storeys::{build_storey_map, StoreyMap};
use ifc_qto_model::{AttributeName, DecodedEntity, EntityId, IfcModel, IfcType, SchemaVersion};
use rustc_hash::FxHashSet;
use std::fmt;
use tracing::{debug, trace};

/// Classes swept first, in this order, each together with its known subtypes
pub const CURATED_CLASSES: [IfcType; 15] = [
    IfcType::IfcWall,
    IfcType::IfcWallStandardCase,
    IfcType::IfcSlab,
    IfcType::IfcSlabStandardCase,
    IfcType::IfcColumn,
    IfcType::IfcBeam,
    IfcType::IfcBeamStandardCase,
    IfcType::IfcRoof,
    IfcType::IfcStair,
    IfcType::IfcFooting,
    IfcType::IfcCovering,
    IfcType::IfcPlate,
    IfcType::IfcMember,
    IfcType::IfcPile,
    IfcType::IfcOpeningElement,
];

/// Extraction settings
#[derive(Clone, Copy, Debug)]
pub struct ExtractOptions {
    /// Also sweep every physical product outside the curated classes
    pub catch_all: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { catch_all: true }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sweep {
    Curated,
    CatchAll,
}

impl fmt::Display for Sweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sweep::Curated => "curated",
            Sweep::CatchAll => "catch-all",
        })
    }
}

/// Identity used for deduplication across sweeps
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EntityKey {
    GlobalId(String),
    Instance(EntityId),
}

impl EntityKey {
    fn of(entity: &DecodedEntity) -> Self {
        match entity.global_id() {
            Some(global_id) => EntityKey::GlobalId(global_id.to_string()),
            None => EntityKey::Instance(entity.id),
        }
    }
}

/// Collect one record per element with default options
pub fn extract_elements(model: &dyn IfcModel) -> Vec<ElementRecord> {
    extract_elements_with(model, &ExtractOptions::default())
}

/// Collect one record per element, unsorted
pub fn extract_elements_with(model: &dyn IfcModel, options: &ExtractOptions) -> Vec<ElementRecord> {
    let collector = Collector {
        model,
        storeys: build_storey_map(model),
        volumes: VolumeResolver::for_model(model),
        schema: model.metadata().schema(),
    };
    let resolver = model.resolver();

    let mut seen: FxHashSet<EntityKey> = FxHashSet::default();
    let mut records = Vec::new();

    for class in &CURATED_CLASSES {
        for swept_as in class.with_subtypes() {
            for element in resolver.entities_by_type(&swept_as) {
                if seen.insert(EntityKey::of(&element)) {
                    records.push(collector.record(&element, &swept_as, Sweep::Curated));
                }
            }
        }
    }
    let curated = records.len();

    if options.catch_all {
        for element in resolver.products() {
            if element.ifc_type.is_spatial_container() {
                continue;
            }
            if seen.insert(EntityKey::of(&element)) {
                let class = element.ifc_type.clone();
                records.push(collector.record(&element, &class, Sweep::CatchAll));
            }
        }
    }

    debug!(
        curated,
        catch_all = records.len() - curated,
        levels = collector.storeys.len(),
        "collected elements"
    );
    records
}

struct Collector<'m> {
    model: &'m dyn IfcModel,
    storeys: StoreyMap,
    volumes: VolumeResolver,
    schema: SchemaVersion,
}

impl Collector<'_> {
    fn record(&self, element: &DecodedEntity, swept_as: &IfcType, sweep: Sweep) -> ElementRecord {
        let identity = element.global_id().map(str::to_string);

        let class = element.declared_type().unwrap_or(swept_as).name().to_string();

        let name = element
            .attribute_text(AttributeName::Name)
            .or_else(|| element.attribute_text(AttributeName::LongName))
            .unwrap_or_default()
            .to_string();

        let type_name = element
            .attribute_text(AttributeName::ObjectType)
            .or_else(|| {
                element
                    .attribute_in(self.schema, AttributeName::PredefinedType)
                    .and_then(|v| v.as_enum())
                    .filter(|t| !t.is_empty())
            })
            .unwrap_or_default()
            .to_string();

        let level = identity
            .as_deref()
            .and_then(|id| self.storeys.level(id))
            .map(str::to_string);

        // Only the curated sweep falls back to geometry
        let volume_m3 = match sweep {
            Sweep::Curated => self
                .volumes
                .get_volume(element, self.model)
                .or_else(|| fallback_geometry_volume(element)),
            Sweep::CatchAll => self.volumes.get_volume(element, self.model),
        };

        trace!(element = %element.id, %class, %sweep, volume = ?volume_m3, "record");

        ElementRecord {
            identity,
            class,
            type_name,
            name,
            level,
            volume_m3,
        }
    }
}
