// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-QTO Model - Trait definitions and shared types for IFC model access
//!
//! This crate provides the abstractions the quantity extractor is written
//! against. A parser backend implements the traits; the extractor never sees
//! the file format.
//!
//! # Architecture
//!
//! - [`IfcParser`] - Entry point for opening IFC content
//! - [`IfcModel`] - Read-only access to a parsed model: relationships and unit scales
//! - [`EntityResolver`] - Entity lookup, type sweeps and reference resolution
//! - [`DecodedEntity::attribute`] - Name-based attribute access backed by [`schema`]
//!
//! # Example
//!
//! ```ignore
//! use ifc_qto_model::{AttributeName, IfcModel, IfcType};
//!
//! fn wall_names(model: &dyn IfcModel) -> Vec<String> {
//!     model
//!         .resolver()
//!         .entities_by_type(&IfcType::IfcWall)
//!         .iter()
//!         .filter_map(|wall| wall.attribute_text(AttributeName::Name).map(String::from))
//!         .collect()
//! }
//! ```

pub mod error;
pub mod relations;
pub mod resolver;
pub mod schema;
pub mod traits;
pub mod types;
pub mod units;

// Re-export all public types
pub use error::*;
pub use relations::*;
pub use resolver::*;
pub use schema::{attribute_index, attribute_index_in, AttributeName, SchemaVersion};
pub use traits::*;
pub use types::*;
pub use units::*;
