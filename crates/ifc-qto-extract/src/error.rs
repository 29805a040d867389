// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the extraction pipeline
//!
//! Resolution and coercion errors are per element: the pipeline recovers
//! them to an absent value and logs them. Only [`ExportError`] reaches the
//! caller.

use ifc_qto_model::{AttributeName, EntityId};
use thiserror::Error;

/// A traversal step through the entity graph failed
#[derive(Debug, Error)]
pub enum AttributeResolutionError {
    #[error("{entity} has no {attribute}")]
    Missing {
        entity: EntityId,
        attribute: AttributeName,
    },

    #[error("{entity}.{attribute} references missing entity {target}")]
    Dangling {
        entity: EntityId,
        attribute: AttributeName,
        target: EntityId,
    },

    #[error("{entity}.{attribute} is {found}, expected {expected}")]
    WrongKind {
        entity: EntityId,
        attribute: AttributeName,
        expected: &'static str,
        found: &'static str,
    },
}

/// A quantity value could not be read as a number
#[derive(Debug, Error)]
#[error("{entity}: cannot read {value:?} as a number")]
pub struct CoercionError {
    pub entity: EntityId,
    pub value: String,
}

/// Why an explicit quantity could not be read
#[derive(Debug, Error)]
pub enum QuantityError {
    #[error(transparent)]
    Attribute(#[from] AttributeResolutionError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// Writing the output table failed
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
