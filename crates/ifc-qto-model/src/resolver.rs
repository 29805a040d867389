// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity resolution trait for looking up and resolving IFC entities

use crate::{AttributeValue, DecodedEntity, EntityId, IfcType};
use std::sync::Arc;

/// Entity lookup and reference resolution
///
/// This trait provides the core functionality for accessing IFC entities
/// and resolving entity references. Implementations should provide O(1)
/// lookup by entity ID and return sweeps in file order.
///
/// # Example
///
/// ```ignore
/// use ifc_qto_model::{AttributeName, EntityResolver, IfcType};
///
/// fn list_storeys(resolver: &dyn EntityResolver) {
///     for rel in resolver.entities_by_type(&IfcType::IfcRelContainedInSpatialStructure) {
///         if let Some(storey) = rel
///             .attribute(AttributeName::RelatingStructure)
///             .and_then(|v| resolver.resolve_ref(v))
///         {
///             println!("{}", storey.attribute_str(AttributeName::Name).unwrap_or("?"));
///         }
///     }
/// }
/// ```
pub trait EntityResolver: Send + Sync {
    /// Get entity by ID
    ///
    /// Returns the decoded entity if it exists, wrapped in an Arc for
    /// efficient sharing.
    fn get(&self, id: EntityId) -> Option<Arc<DecodedEntity>>;

    /// Resolve an entity reference from an attribute value
    ///
    /// Returns `None` if the value is not a reference or the target is missing.
    fn resolve_ref(&self, attr: &AttributeValue) -> Option<Arc<DecodedEntity>> {
        match attr {
            AttributeValue::EntityRef(id) => self.get(*id),
            _ => None,
        }
    }

    /// Resolve a list of entity references
    ///
    /// Entries that are not references, or whose target is missing, are dropped.
    fn resolve_ref_list(&self, attr: &AttributeValue) -> Vec<Arc<DecodedEntity>> {
        match attr {
            AttributeValue::List(items) => items
                .iter()
                .filter_map(|item| self.resolve_ref(item))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Get all entities of exactly this type, in file order
    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<Arc<DecodedEntity>>;

    /// Get every physical product (see [`IfcType::is_product`]), in file order
    fn products(&self) -> Vec<Arc<DecodedEntity>>;

    /// Count entities of a specific type
    fn count_by_type(&self, ifc_type: &IfcType) -> usize;

    /// Get total entity count
    fn entity_count(&self) -> usize;
}
