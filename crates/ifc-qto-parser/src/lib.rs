// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-QTO Parser - STEP physical file parser for IFC models
//!
//! This crate implements the traits defined in `ifc-qto-model` on top of a
//! STEP (ISO 10303-21) reader.
//!
//! # Features
//!
//! - **Tokenization** using `nom` combinators
//! - **SIMD-accelerated scanning** using `memchr`
//! - **Eager decoding** - malformed records fail the open, not the extraction
//! - **Inverse relationship index** for property and containment lookups
//! - **Unit scales** per unit category, including conversion-based units
//!
//! # Example
//!
//! ```ignore
//! use ifc_qto_model::{IfcType, UnitCategory};
//!
//! let model = ifc_qto_parser::open("building.ifc")?;
//! let walls = model.resolver().entities_by_type(&IfcType::IfcWall);
//! println!("Found {} walls", walls.len());
//! println!("Length scale: {}", model.unit_scale(UnitCategory::Length));
//! ```

mod decoder;
mod model;
mod relations;
mod resolver;
mod scanner;
mod tokenizer;
mod units;

pub use model::ParsedModel;
pub use tokenizer::decode_step_string;

use ifc_qto_model::{IfcModel, IfcParser, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// STEP/IFC parser implementing the `IfcParser` trait
#[derive(Clone, Copy, Debug, Default)]
pub struct StepParser;

impl StepParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }
}

impl IfcParser for StepParser {
    fn parse(&self, content: &[u8]) -> Result<Arc<dyn IfcModel>> {
        ParsedModel::parse(content).map(|m| Arc::new(m) as Arc<dyn IfcModel>)
    }
}

/// Quick parse function for simple use cases
pub fn parse(content: &[u8]) -> Result<Arc<dyn IfcModel>> {
    StepParser::new().parse(content)
}

/// Read and parse an IFC file from disk
pub fn open(path: impl AsRef<Path>) -> Result<Arc<dyn IfcModel>> {
    let path = path.as_ref();
    let content = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = content.len(), "read IFC file");
    parse(&content)
}
