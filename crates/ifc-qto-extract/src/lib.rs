// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-QTO Extract - Quantity take-off over IFC models
//!
//! Flattens an [`IfcModel`] into one row per physical element with its class,
//! type, name, containing level and explicit volume in cubic meters.
//!
//! # Pipeline
//!
//! 1. [`build_storey_map`] - element GlobalId to level label
//! 2. [`VolumeResolver`] - explicit `IfcQuantityVolume` values, unit-scaled
//! 3. [`extract_elements`] - curated and catch-all sweeps, one record per element
//! 4. [`OutputTable::assemble`] - volume cleanup and `(class, level, name)` order
//!
//! # Example
//!
//! ```ignore
//! use ifc_qto_extract::{extract, ExtractOptions};
//!
//! let model = ifc_qto_parser::open("building.ifc")?;
//! let table = extract(model.as_ref(), &ExtractOptions::default());
//! table.write_csv(std::io::stdout())?;
//! ```

mod collector;
mod error;
mod graph;
mod quantities;
mod record;
mod storeys;
mod table;

#[cfg(test)]
mod fixtures;

pub use collector::{extract_elements, extract_elements_with, ExtractOptions, CURATED_CLASSES};
pub use error::{AttributeResolutionError, CoercionError, ExportError, QuantityError};
pub use quantities::{fallback_geometry_volume, VolumeResolver};
pub use record::{ElementRecord, CSV_HEADER};
pub use storeys::{build_storey_map, storey_label, StoreyMap};
pub use table::{OutputTable, TableFilter};

use ifc_qto_model::IfcModel;
use tracing::info;

/// Run the whole pipeline on an open model
pub fn extract(model: &dyn IfcModel, options: &ExtractOptions) -> OutputTable {
    let table = OutputTable::assemble(extract_elements_with(model, options));
    info!(
        elements = table.len(),
        with_volume = table.volume_count(),
        "extracted quantities"
    );
    table
}
