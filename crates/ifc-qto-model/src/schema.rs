// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute layouts for name-based access
//!
//! STEP stores attributes positionally. This module maps the attribute names
//! the extractor cares about onto their positions for each entity type, so
//! callers can ask for `Name` or `RelatingStructure` instead of hard-coding
//! indices. Layouts follow IFC4. `PredefinedType` is the one attribute whose
//! slot depends on the schema release; [`attribute_index_in`] takes the
//! release into account.

use crate::IfcType;
use std::fmt;

/// IFC schema release, as declared by `FILE_SCHEMA`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    Ifc2x3,
    #[default]
    Ifc4,
    Ifc4x3,
}

impl SchemaVersion {
    /// Classify a `FILE_SCHEMA` identifier such as `IFC2X3` or `IFC4X3_ADD2`
    ///
    /// Anything unrecognized is read with the IFC4 layouts.
    pub fn from_identifier(identifier: &str) -> Self {
        let id = identifier.trim().to_ascii_uppercase();
        if id.starts_with("IFC2X") {
            SchemaVersion::Ifc2x3
        } else if id.starts_with("IFC4X3") {
            SchemaVersion::Ifc4x3
        } else {
            SchemaVersion::Ifc4
        }
    }
}

/// Attribute names understood by [`attribute_index`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeName {
    GlobalId,
    Name,
    ObjectType,
    LongName,
    PredefinedType,
    RelatedElements,
    RelatingStructure,
    RelatedObjects,
    RelatingPropertyDefinition,
    Quantities,
    /// Value slot of `IfcQuantityVolume`
    VolumeValue,
    /// Legacy alias of [`AttributeName::VolumeValue`]
    Volume,
    UnitsInContext,
    Units,
    UnitType,
    Prefix,
    ConversionFactor,
    ValueComponent,
    UnitComponent,
}

impl AttributeName {
    /// Schema spelling of the attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeName::GlobalId => "GlobalId",
            AttributeName::Name => "Name",
            AttributeName::ObjectType => "ObjectType",
            AttributeName::LongName => "LongName",
            AttributeName::PredefinedType => "PredefinedType",
            AttributeName::RelatedElements => "RelatedElements",
            AttributeName::RelatingStructure => "RelatingStructure",
            AttributeName::RelatedObjects => "RelatedObjects",
            AttributeName::RelatingPropertyDefinition => "RelatingPropertyDefinition",
            AttributeName::Quantities => "Quantities",
            AttributeName::VolumeValue => "VolumeValue",
            AttributeName::Volume => "Volume",
            AttributeName::UnitsInContext => "UnitsInContext",
            AttributeName::Units => "Units",
            AttributeName::UnitType => "UnitType",
            AttributeName::Prefix => "Prefix",
            AttributeName::ConversionFactor => "ConversionFactor",
            AttributeName::ValueComponent => "ValueComponent",
            AttributeName::UnitComponent => "UnitComponent",
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of `name` in the IFC4 attribute list of `ifc_type`, if the type defines it
pub fn attribute_index(ifc_type: &IfcType, name: AttributeName) -> Option<usize> {
    attribute_index_in(SchemaVersion::Ifc4, ifc_type, name)
}

/// Position of `name` in the attribute list of `ifc_type` under `schema`
pub fn attribute_index_in(
    schema: SchemaVersion,
    ifc_type: &IfcType,
    name: AttributeName,
) -> Option<usize> {
    use AttributeName as A;

    match name {
        A::GlobalId => ifc_type.is_rooted().then_some(0),
        A::Name => match ifc_type {
            t if t.is_quantity() => Some(0),
            // IfcSIUnit(Dimensions, UnitType, Prefix, Name)
            IfcType::IfcSIUnit => Some(3),
            // IfcConversionBasedUnit(Dimensions, UnitType, Name, ConversionFactor)
            IfcType::IfcConversionBasedUnit => Some(2),
            t if t.is_rooted() => Some(2),
            _ => None,
        },
        A::ObjectType => {
            (ifc_type.is_product() || matches!(ifc_type, IfcType::Unknown(_))).then_some(4)
        }
        A::LongName => match ifc_type {
            IfcType::IfcProject => Some(5),
            t if t.is_spatial_element() => Some(7),
            _ => None,
        },
        A::PredefinedType => predefined_type_index(schema, ifc_type),
        A::RelatedElements => {
            (ifc_type == &IfcType::IfcRelContainedInSpatialStructure).then_some(4)
        }
        A::RelatingStructure => {
            (ifc_type == &IfcType::IfcRelContainedInSpatialStructure).then_some(5)
        }
        A::RelatedObjects => (ifc_type == &IfcType::IfcRelDefinesByProperties).then_some(4),
        A::RelatingPropertyDefinition => {
            (ifc_type == &IfcType::IfcRelDefinesByProperties).then_some(5)
        }
        A::Quantities => (ifc_type == &IfcType::IfcElementQuantity).then_some(5),
        // IfcQuantityVolume(Name, Description, Unit, VolumeValue, Formula)
        A::VolumeValue | A::Volume => (ifc_type == &IfcType::IfcQuantityVolume).then_some(3),
        A::UnitsInContext => (ifc_type == &IfcType::IfcProject).then_some(8),
        A::Units => (ifc_type == &IfcType::IfcUnitAssignment).then_some(0),
        A::UnitType => matches!(
            ifc_type,
            IfcType::IfcSIUnit | IfcType::IfcConversionBasedUnit
        )
        .then_some(1),
        A::Prefix => (ifc_type == &IfcType::IfcSIUnit).then_some(2),
        A::ConversionFactor => (ifc_type == &IfcType::IfcConversionBasedUnit).then_some(3),
        A::ValueComponent => (ifc_type == &IfcType::IfcMeasureWithUnit).then_some(0),
        A::UnitComponent => (ifc_type == &IfcType::IfcMeasureWithUnit).then_some(1),
    }
}

/// `PredefinedType` follows the element-specific attributes, so its slot varies
fn predefined_type_index(schema: SchemaVersion, ifc_type: &IfcType) -> Option<usize> {
    use IfcType as T;

    match schema {
        SchemaVersion::Ifc2x3 => ifc2x3_predefined_type_index(ifc_type),
        SchemaVersion::Ifc4 | SchemaVersion::Ifc4x3 => match ifc_type {
            // OverallHeight, OverallWidth come first
            T::IfcDoor | T::IfcDoorStandardCase | T::IfcWindow | T::IfcWindowStandardCase => {
                Some(10)
            }
            // UAxes, VAxes, WAxes
            T::IfcGrid => Some(10),
            // AssemblyPlace or SteelGrade
            T::IfcElementAssembly | T::IfcTendon | T::IfcTendonAnchor | T::IfcTendonConduit => {
                Some(9)
            }
            // NominalDiameter, NominalLength
            T::IfcMechanicalFastener => Some(10),
            // SteelGrade and bar dimensions
            T::IfcReinforcingBar => Some(12),
            T::IfcReinforcingMesh => Some(17),
            // after CompositionType
            T::IfcSpace
            | T::IfcBridge
            | T::IfcRoad
            | T::IfcRailway
            | T::IfcMarineFacility
            | T::IfcFacilityPart
            | T::IfcBridgePart
            | T::IfcRoadPart
            | T::IfcRailwayPart
            | T::IfcMarinePart => Some(9),
            // after LongName
            T::IfcSpatialZone | T::IfcExternalSpatialElement => Some(8),
            t if t.is_spatial_element() => None,
            // IfcProduct subtypes without Tag
            T::IfcStructuralCurveMember
            | T::IfcStructuralCurveMemberVarying
            | T::IfcStructuralSurfaceMember
            | T::IfcStructuralSurfaceMemberVarying => Some(7),
            T::IfcStructuralCurveAction
            | T::IfcStructuralLinearAction
            | T::IfcStructuralSurfaceAction
            | T::IfcStructuralPlanarAction => Some(11),
            T::IfcStructuralCurveReaction | T::IfcStructuralSurfaceReaction => Some(9),
            T::IfcAnnotation | T::IfcAlignment | T::IfcReferent => {
                (schema == SchemaVersion::Ifc4x3).then_some(7)
            }
            T::IfcDistributionPort => Some(8),
            T::IfcProxy
            | T::IfcCivilElement
            | T::IfcAlignmentCant
            | T::IfcAlignmentHorizontal
            | T::IfcAlignmentSegment
            | T::IfcAlignmentVertical
            | T::IfcStructuralCurveConnection
            | T::IfcStructuralPointConnection
            | T::IfcStructuralSurfaceConnection
            | T::IfcStructuralPointAction
            | T::IfcStructuralLinearActionVarying
            | T::IfcStructuralPlanarActionVarying
            | T::IfcStructuralPointReaction => None,
            t if t.is_product() => Some(8),
            _ => None,
        },
    }
}

/// IFC2X3 defines `PredefinedType` on a handful of products only
fn ifc2x3_predefined_type_index(ifc_type: &IfcType) -> Option<usize> {
    use IfcType as T;

    match ifc_type {
        T::IfcSlab | T::IfcCovering | T::IfcRailing | T::IfcFooting | T::IfcPile => Some(8),
        T::IfcElementAssembly | T::IfcTendon => Some(9),
        T::IfcStructuralCurveMember | T::IfcStructuralSurfaceMember => Some(7),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_header_positions() {
        assert_eq!(attribute_index(&IfcType::IfcWall, AttributeName::GlobalId), Some(0));
        assert_eq!(attribute_index(&IfcType::IfcWall, AttributeName::Name), Some(2));
        assert_eq!(
            attribute_index(&IfcType::IfcRelDefinesByProperties, AttributeName::Name),
            Some(2)
        );
        assert_eq!(attribute_index(&IfcType::IfcSIUnit, AttributeName::GlobalId), None);
    }

    #[test]
    fn test_long_name_only_on_spatial_structure() {
        assert_eq!(
            attribute_index(&IfcType::IfcBuildingStorey, AttributeName::LongName),
            Some(7)
        );
        assert_eq!(attribute_index(&IfcType::IfcProject, AttributeName::LongName), Some(5));
        assert_eq!(attribute_index(&IfcType::IfcWall, AttributeName::LongName), None);
    }

    #[test]
    fn test_predefined_type_slots() {
        assert_eq!(
            attribute_index(&IfcType::IfcSlab, AttributeName::PredefinedType),
            Some(8)
        );
        assert_eq!(
            attribute_index(&IfcType::IfcDoor, AttributeName::PredefinedType),
            Some(10)
        );
        assert_eq!(
            attribute_index(&IfcType::IfcBuildingStorey, AttributeName::PredefinedType),
            None
        );
    }

    #[test]
    fn test_predefined_type_after_element_specific_attributes() {
        let slot = |t: IfcType| attribute_index(&t, AttributeName::PredefinedType);
        assert_eq!(slot(IfcType::IfcElementAssembly), Some(9));
        assert_eq!(slot(IfcType::IfcTendonAnchor), Some(9));
        assert_eq!(slot(IfcType::IfcMechanicalFastener), Some(10));
        assert_eq!(slot(IfcType::IfcReinforcingBar), Some(12));
        assert_eq!(slot(IfcType::IfcSpace), Some(9));
        assert_eq!(slot(IfcType::IfcStructuralCurveMember), Some(7));
        assert_eq!(slot(IfcType::IfcFan), Some(8));
        assert_eq!(slot(IfcType::IfcProxy), None);
        assert_eq!(slot(IfcType::IfcAnnotation), None);
        assert_eq!(
            attribute_index_in(
                SchemaVersion::Ifc4x3,
                &IfcType::IfcAnnotation,
                AttributeName::PredefinedType
            ),
            Some(7)
        );
    }

    #[test]
    fn test_ifc2x3_predefined_type() {
        let slot =
            |t: IfcType| attribute_index_in(SchemaVersion::Ifc2x3, &t, AttributeName::PredefinedType);
        // CompositionType, ShapeType and OverallHeight occupy slot 8 instead
        assert_eq!(slot(IfcType::IfcBuildingElementProxy), None);
        assert_eq!(slot(IfcType::IfcRoof), None);
        assert_eq!(slot(IfcType::IfcStair), None);
        assert_eq!(slot(IfcType::IfcDoor), None);
        assert_eq!(slot(IfcType::IfcWall), None);
        assert_eq!(slot(IfcType::IfcSlab), Some(8));
        assert_eq!(slot(IfcType::IfcElementAssembly), Some(9));
        // other attributes are unaffected
        assert_eq!(
            attribute_index_in(SchemaVersion::Ifc2x3, &IfcType::IfcRoof, AttributeName::Name),
            Some(2)
        );
    }

    #[test]
    fn test_schema_identifiers() {
        assert_eq!(SchemaVersion::from_identifier("IFC2X3"), SchemaVersion::Ifc2x3);
        assert_eq!(SchemaVersion::from_identifier("ifc2x3_tc1"), SchemaVersion::Ifc2x3);
        assert_eq!(SchemaVersion::from_identifier("IFC4"), SchemaVersion::Ifc4);
        assert_eq!(SchemaVersion::from_identifier("IFC4X1"), SchemaVersion::Ifc4);
        assert_eq!(SchemaVersion::from_identifier("IFC4X3_ADD2"), SchemaVersion::Ifc4x3);
        assert_eq!(SchemaVersion::from_identifier("IFC5"), SchemaVersion::Ifc4);
    }

    #[test]
    fn test_volume_aliases_share_a_slot() {
        let volume = IfcType::IfcQuantityVolume;
        assert_eq!(attribute_index(&volume, AttributeName::VolumeValue), Some(3));
        assert_eq!(attribute_index(&volume, AttributeName::Volume), Some(3));
        assert_eq!(
            attribute_index(&IfcType::IfcQuantityArea, AttributeName::VolumeValue),
            None
        );
    }

    #[test]
    fn test_relationship_slots() {
        let rel = IfcType::IfcRelContainedInSpatialStructure;
        assert_eq!(attribute_index(&rel, AttributeName::RelatedElements), Some(4));
        assert_eq!(attribute_index(&rel, AttributeName::RelatingStructure), Some(5));

        let defines = IfcType::IfcRelDefinesByProperties;
        assert_eq!(attribute_index(&defines, AttributeName::RelatedObjects), Some(4));
        assert_eq!(
            attribute_index(&defines, AttributeName::RelatingPropertyDefinition),
            Some(5)
        );
    }
}
