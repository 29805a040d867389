// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial containment index
//!
//! Maps element GlobalIds to the label of the spatial structure that
//! contains them, from every `IfcRelContainedInSpatialStructure` in the file.

use crate::graph::follow_ref;
use ifc_qto_model::{AttributeName, DecodedEntity, IfcModel, IfcType};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Element GlobalId -> level label
#[derive(Clone, Debug, Default)]
pub struct StoreyMap {
    levels: FxHashMap<String, String>,
}

impl StoreyMap {
    /// Level label of the element with this GlobalId
    pub fn level(&self, global_id: &str) -> Option<&str> {
        self.levels.get(global_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Build the containment map
///
/// Relationships are scanned in file order. When several of them contain the
/// same element the last one scanned wins. Dangling references and elements
/// without a GlobalId are skipped.
pub fn build_storey_map(model: &dyn IfcModel) -> StoreyMap {
    let resolver = model.resolver();
    let mut levels: FxHashMap<String, String> = FxHashMap::default();

    for rel in resolver.entities_by_type(&IfcType::IfcRelContainedInSpatialStructure) {
        let structure = match follow_ref(resolver, &rel, AttributeName::RelatingStructure) {
            Ok(structure) => structure,
            Err(error) => {
                debug!(rel = %rel.id, %error, "skipping containment relationship");
                continue;
            }
        };
        let label = storey_label(&structure);

        for id in rel.attribute_refs(AttributeName::RelatedElements) {
            let Some(element) = resolver.get(id) else {
                debug!(rel = %rel.id, element = %id, "dangling contained element");
                continue;
            };
            let Some(global_id) = element.global_id() else {
                continue;
            };

            if let Some(previous) = levels.insert(global_id.to_string(), label.clone()) {
                if previous != label {
                    warn!(
                        element = global_id,
                        %previous,
                        current = %label,
                        "element contained in several structures, keeping the last"
                    );
                }
            }
        }
    }

    debug!(elements = levels.len(), "built containment map");
    StoreyMap { levels }
}

/// `Name`, else `LongName`, else `Storey_<GlobalId>` (or `Storey_#<id>`)
pub fn storey_label(structure: &DecodedEntity) -> String {
    structure
        .attribute_text(AttributeName::Name)
        .or_else(|| structure.attribute_text(AttributeName::LongName))
        .map(str::to_string)
        .unwrap_or_else(|| match structure.global_id() {
            Some(global_id) => format!("Storey_{global_id}"),
            None => format!("Storey_{}", structure.id),
        })
}
