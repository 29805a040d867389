// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for IFC model access
//!
//! These traits are the whole contract between a parser backend and the
//! extraction pipeline.

use crate::{DecodedEntity, EntityId, EntityResolver, ModelMetadata, RelationshipKind, Result, UnitCategory};
use std::sync::Arc;

/// Main parsing interface - entry point for opening IFC content
///
/// # Example
///
/// ```ignore
/// use ifc_qto_model::{IfcParser, UnitCategory};
///
/// let parser: Box<dyn IfcParser> = get_parser();
/// let model = parser.parse(&bytes)?;
/// println!("Schema: {}", model.metadata().schema_version);
/// println!("Length scale: {}", model.unit_scale(UnitCategory::Length));
/// ```
pub trait IfcParser: Send + Sync {
    /// Parse IFC file content and return a model
    ///
    /// # Returns
    /// An `Arc<dyn IfcModel>` on success, or a `ParseError` when the content
    /// is not a well-formed IFC file
    fn parse(&self, content: &[u8]) -> Result<Arc<dyn IfcModel>>;
}

/// Read-only access to a parsed IFC model
///
/// The model is thread-safe (`Send + Sync`) so a handle can be moved into
/// worker threads, although extraction itself never shares it.
pub trait IfcModel: Send + Sync {
    /// Get entity resolver for entity lookups and reference resolution
    fn resolver(&self) -> &dyn EntityResolver;

    /// Relationship entities of `kind` that name `id` as a related object
    ///
    /// Returned in file order. Empty when the entity takes part in none.
    fn relationships(&self, id: EntityId, kind: RelationshipKind) -> Vec<Arc<DecodedEntity>>;

    /// Scale factor from the project's unit of `category` to its SI unit
    ///
    /// For `UnitCategory::Length` this converts file units to meters. Common
    /// values:
    /// - 1.0 for meters
    /// - 0.001 for millimeters
    /// - 0.0254 for inches
    /// - 0.3048 for feet
    ///
    /// Returns 1.0 when the project declares no unit of that category.
    fn unit_scale(&self, category: UnitCategory) -> f64;

    /// Get file metadata (schema version, originating system, etc.)
    fn metadata(&self) -> &ModelMetadata;
}
