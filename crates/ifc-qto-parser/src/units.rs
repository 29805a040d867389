// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit scale extraction from IFC files

use ifc_qto_model::{AttributeName, DecodedEntity, EntityResolver, IfcType, UnitCategory};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

/// Conversion-based units may chain; deeper chains are treated as missing
const MAX_UNIT_DEPTH: usize = 4;

/// Project unit scales, one per category found in the unit assignment
#[derive(Clone, Debug, Default)]
pub struct UnitScales {
    scales: FxHashMap<UnitCategory, f64>,
}

impl UnitScales {
    /// Scale for `category`, 1.0 when the project declares none
    pub fn get(&self, category: UnitCategory) -> f64 {
        self.scales.get(&category).copied().unwrap_or(1.0)
    }
}

/// Extract project unit scales
///
/// Units are read from `IfcProject.UnitsInContext`, falling back to the first
/// `IfcUnitAssignment` in the file.
pub fn extract_unit_scales(resolver: &dyn EntityResolver) -> UnitScales {
    let mut scales = FxHashMap::default();

    let Some(assignment) = unit_assignment(resolver) else {
        debug!("no unit assignment, using SI units");
        return UnitScales { scales };
    };

    let units = assignment
        .attribute(AttributeName::Units)
        .map(|list| resolver.resolve_ref_list(list))
        .unwrap_or_default();

    for category in [
        UnitCategory::Length,
        UnitCategory::Area,
        UnitCategory::Volume,
        UnitCategory::PlaneAngle,
    ] {
        let scale = units
            .iter()
            .find(|unit| unit.attribute_enum(AttributeName::UnitType) == Some(category.unit_type()))
            .and_then(|unit| unit_scale(unit, category, resolver, 0));

        match scale {
            Some(scale) if scale.is_finite() && scale > 0.0 => {
                debug!(%category, scale, "project unit");
                scales.insert(category, scale);
            }
            Some(scale) => debug!(%category, scale, "ignoring non-positive unit scale"),
            None => {}
        }
    }

    UnitScales { scales }
}

fn unit_assignment(resolver: &dyn EntityResolver) -> Option<Arc<DecodedEntity>> {
    let from_project = resolver
        .entities_by_type(&IfcType::IfcProject)
        .first()
        .and_then(|project| project.attribute(AttributeName::UnitsInContext))
        .and_then(|units| resolver.resolve_ref(units))
        .filter(|assignment| assignment.ifc_type == IfcType::IfcUnitAssignment);

    from_project.or_else(|| {
        resolver
            .entities_by_type(&IfcType::IfcUnitAssignment)
            .into_iter()
            .next()
    })
}

/// Scale of a unit entity (IFCSIUNIT or IFCCONVERSIONBASEDUNIT)
fn unit_scale(
    unit: &DecodedEntity,
    category: UnitCategory,
    resolver: &dyn EntityResolver,
    depth: usize,
) -> Option<f64> {
    if depth > MAX_UNIT_DEPTH {
        return None;
    }

    match unit.ifc_type {
        IfcType::IfcSIUnit => si_unit_scale(unit, category),
        IfcType::IfcConversionBasedUnit => conversion_unit_scale(unit, category, resolver, depth),
        _ => None,
    }
}

/// IFCSIUNIT(*, UnitType, Prefix, Name)
///
/// The prefix is raised to the unit's dimension: MILLI on SQUARE_METRE is 1e-6.
fn si_unit_scale(unit: &DecodedEntity, category: UnitCategory) -> Option<f64> {
    if unit.attribute_enum(AttributeName::Name)? != category.si_base_name() {
        return None;
    }

    let prefix = unit
        .attribute_enum(AttributeName::Prefix)
        .map(prefix_scale)
        .unwrap_or(1.0);

    Some(prefix.powi(category.prefix_exponent()))
}

fn prefix_scale(prefix: &str) -> f64 {
    match prefix {
        "EXA" => 1e18,
        "PETA" => 1e15,
        "TERA" => 1e12,
        "GIGA" => 1e9,
        "MEGA" => 1e6,
        "KILO" => 1e3,
        "HECTO" => 1e2,
        "DECA" => 1e1,
        "DECI" => 1e-1,
        "CENTI" => 1e-2,
        "MILLI" => 1e-3,
        "MICRO" => 1e-6,
        "NANO" => 1e-9,
        "PICO" => 1e-12,
        "FEMTO" => 1e-15,
        "ATTO" => 1e-18,
        _ => 1.0,
    }
}

/// IFCCONVERSIONBASEDUNIT(Dimensions, UnitType, Name, ConversionFactor)
///
/// The factor is an IFCMEASUREWITHUNIT whose value is scaled by its own unit.
fn conversion_unit_scale(
    unit: &DecodedEntity,
    category: UnitCategory,
    resolver: &dyn EntityResolver,
    depth: usize,
) -> Option<f64> {
    let factor = resolver.resolve_ref(unit.attribute(AttributeName::ConversionFactor)?)?;
    if factor.ifc_type != IfcType::IfcMeasureWithUnit {
        return None;
    }

    let value = factor.attribute(AttributeName::ValueComponent)?.as_float()?;

    let base_scale = factor
        .attribute(AttributeName::UnitComponent)
        .and_then(|u| resolver.resolve_ref(u))
        .and_then(|base| unit_scale(&base, category, resolver, depth + 1))
        .unwrap_or(1.0);

    Some(value * base_scale)
}
