// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Explicit volume quantities
//!
//! Volumes come from `IfcQuantityVolume` entries of an `IfcElementQuantity`
//! attached through `IfcRelDefinesByProperties`. The first one found wins.

use crate::error::{AttributeResolutionError, CoercionError, QuantityError};
use crate::graph::{follow_ref, follow_refs};
use ifc_qto_model::{
    AttributeName, AttributeValue, DecodedEntity, IfcModel, IfcType, RelationshipKind,
    UnitCategory,
};
use tracing::{debug, trace};

/// Reads explicit volumes and converts them to cubic meters
#[derive(Clone, Copy, Debug)]
pub struct VolumeResolver {
    length_scale: f64,
}

impl VolumeResolver {
    /// Resolver for a model whose lengths are `length_scale` meters per unit
    pub fn new(length_scale: f64) -> Self {
        Self { length_scale }
    }

    /// Resolver using the model's project length unit
    pub fn for_model(model: &dyn IfcModel) -> Self {
        Self::new(model.unit_scale(UnitCategory::Length))
    }

    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    /// Explicit volume of `element` in cubic meters
    ///
    /// Volumes are stored in project length units cubed and are scaled by
    /// `length_scale³`. Broken references and unreadable values yield `None`.
    pub fn get_volume(&self, element: &DecodedEntity, model: &dyn IfcModel) -> Option<f64> {
        match explicit_volume(element, model) {
            Ok(volume) => volume.map(|v| v * self.length_scale.powi(3)),
            Err(error) => {
                debug!(element = %element.id, %error, "volume unavailable");
                None
            }
        }
    }
}

/// First `IfcQuantityVolume` value reachable from the element, unscaled
fn explicit_volume(
    element: &DecodedEntity,
    model: &dyn IfcModel,
) -> Result<Option<f64>, QuantityError> {
    let resolver = model.resolver();

    for rel in model.relationships(element.id, RelationshipKind::IsDefinedBy) {
        let definition = follow_ref(resolver, &rel, AttributeName::RelatingPropertyDefinition)?;
        if definition.ifc_type != IfcType::IfcElementQuantity {
            continue;
        }

        for quantity in follow_refs(resolver, &definition, AttributeName::Quantities)? {
            if quantity.ifc_type != IfcType::IfcQuantityVolume {
                continue;
            }
            let value = quantity
                .attribute(AttributeName::VolumeValue)
                .or_else(|| quantity.attribute(AttributeName::Volume));
            if let Some(value) = value {
                return coerce_volume(&quantity, value).map(Some);
            }
        }
    }

    Ok(None)
}

/// Read a quantity value as a number
///
/// Numeric text is accepted; any other text is a [`CoercionError`].
fn coerce_volume(quantity: &DecodedEntity, value: &AttributeValue) -> Result<f64, QuantityError> {
    if let Some(number) = value.as_float() {
        return Ok(number);
    }

    if let Some(text) = value.as_string() {
        return text.trim().parse::<f64>().map_err(|_| {
            CoercionError {
                entity: quantity.id,
                value: text.to_string(),
            }
            .into()
        });
    }

    Err(AttributeResolutionError::WrongKind {
        entity: quantity.id,
        attribute: AttributeName::VolumeValue,
        expected: "number",
        found: value.kind(),
    }
    .into())
}

/// Geometry-derived volume
///
/// Not computed: always `None`. Only the curated sweep consults it.
pub fn fallback_geometry_volume(element: &DecodedEntity) -> Option<f64> {
    trace!(element = %element.id, "no geometry volume");
    None
}
