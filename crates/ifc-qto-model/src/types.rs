// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for IFC data representation
//!
//! This module defines the fundamental types shared by the parser backend and
//! the extraction pipeline.

use crate::schema::{attribute_index, attribute_index_in, AttributeName, SchemaVersion};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the raw STEP instance id (e.g., #123 becomes EntityId(123))
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Declares the recognized IFC entity types.
///
/// Each entry pairs the canonical variant (whose name doubles as the display
/// spelling, e.g. `IfcWall`) with the upper-case token used in STEP files.
macro_rules! ifc_types {
    ($($variant:ident => $token:literal),* $(,)?) => {
        /// IFC entity type enumeration
        ///
        /// Closed set of the entity types the extractor reasons about. Any other
        /// type is captured with its original spelling.
        #[derive(Clone, PartialEq, Eq, Hash, Debug)]
        pub enum IfcType {
            $($variant,)*
            /// Unknown type - stores the original type name string
            Unknown(String),
        }

        impl IfcType {
            /// Parse a STEP type token (case-insensitive) into an IfcType
            pub fn parse(s: &str) -> Self {
                match s.to_ascii_uppercase().as_str() {
                    $($token => IfcType::$variant,)*
                    _ => IfcType::Unknown(s.to_string()),
                }
            }

            /// Canonical type name (`IfcWall`), or the raw token for unknown types
            pub fn name(&self) -> &str {
                match self {
                    $(IfcType::$variant => stringify!($variant),)*
                    IfcType::Unknown(s) => s,
                }
            }
        }
    };
}

ifc_types! {
    // Spatial structure
    IfcProject => "IFCPROJECT",
    IfcSite => "IFCSITE",
    IfcBuilding => "IFCBUILDING",
    IfcBuildingStorey => "IFCBUILDINGSTOREY",
    IfcSpace => "IFCSPACE",
    IfcExternalSpatialElement => "IFCEXTERNALSPATIALELEMENT",
    IfcFacility => "IFCFACILITY",
    IfcFacilityPart => "IFCFACILITYPART",
    IfcRoad => "IFCROAD",
    IfcRoadPart => "IFCROADPART",
    IfcBridge => "IFCBRIDGE",
    IfcBridgePart => "IFCBRIDGEPART",
    IfcRailway => "IFCRAILWAY",
    IfcRailwayPart => "IFCRAILWAYPART",
    IfcMarineFacility => "IFCMARINEFACILITY",
    IfcMarinePart => "IFCMARINEPART",
    IfcSpatialZone => "IFCSPATIALZONE",

    // Building elements
    IfcWall => "IFCWALL",
    IfcWallStandardCase => "IFCWALLSTANDARDCASE",
    IfcWallElementedCase => "IFCWALLELEMENTEDCASE",
    IfcCurtainWall => "IFCCURTAINWALL",
    IfcSlab => "IFCSLAB",
    IfcSlabStandardCase => "IFCSLABSTANDARDCASE",
    IfcSlabElementedCase => "IFCSLABELEMENTEDCASE",
    IfcRoof => "IFCROOF",
    IfcBeam => "IFCBEAM",
    IfcBeamStandardCase => "IFCBEAMSTANDARDCASE",
    IfcColumn => "IFCCOLUMN",
    IfcColumnStandardCase => "IFCCOLUMNSTANDARDCASE",
    IfcDoor => "IFCDOOR",
    IfcDoorStandardCase => "IFCDOORSTANDARDCASE",
    IfcWindow => "IFCWINDOW",
    IfcWindowStandardCase => "IFCWINDOWSTANDARDCASE",
    IfcStair => "IFCSTAIR",
    IfcStairFlight => "IFCSTAIRFLIGHT",
    IfcRamp => "IFCRAMP",
    IfcRampFlight => "IFCRAMPFLIGHT",
    IfcRailing => "IFCRAILING",
    IfcCovering => "IFCCOVERING",
    IfcPlate => "IFCPLATE",
    IfcPlateStandardCase => "IFCPLATESTANDARDCASE",
    IfcMember => "IFCMEMBER",
    IfcMemberStandardCase => "IFCMEMBERSTANDARDCASE",
    IfcFooting => "IFCFOOTING",
    IfcPile => "IFCPILE",
    IfcChimney => "IFCCHIMNEY",
    IfcShadingDevice => "IFCSHADINGDEVICE",
    IfcBuildingElementProxy => "IFCBUILDINGELEMENTPROXY",
    IfcBuildingElementPart => "IFCBUILDINGELEMENTPART",
    IfcElementAssembly => "IFCELEMENTASSEMBLY",
    IfcCivilElement => "IFCCIVILELEMENT",
    IfcGeographicElement => "IFCGEOGRAPHICELEMENT",
    IfcTransportElement => "IFCTRANSPORTELEMENT",
    IfcVirtualElement => "IFCVIRTUALELEMENT",

    // Fasteners and reinforcement
    IfcDiscreteAccessory => "IFCDISCRETEACCESSORY",
    IfcFastener => "IFCFASTENER",
    IfcMechanicalFastener => "IFCMECHANICALFASTENER",
    IfcReinforcingBar => "IFCREINFORCINGBAR",
    IfcReinforcingMesh => "IFCREINFORCINGMESH",
    IfcTendon => "IFCTENDON",
    IfcTendonAnchor => "IFCTENDONANCHOR",

    // Built elements added in IFC4x3
    IfcBuiltElement => "IFCBUILTELEMENT",
    IfcBearing => "IFCBEARING",
    IfcCaissonFoundation => "IFCCAISSONFOUNDATION",
    IfcMooringDevice => "IFCMOORINGDEVICE",
    IfcNavigationElement => "IFCNAVIGATIONELEMENT",
    IfcRail => "IFCRAIL",
    IfcTrackElement => "IFCTRACKELEMENT",
    IfcReinforcedSoil => "IFCREINFORCEDSOIL",
    IfcBuildingElementComponent => "IFCBUILDINGELEMENTCOMPONENT",

    // Element components
    IfcTendonConduit => "IFCTENDONCONDUIT",
    IfcImpactProtectionDevice => "IFCIMPACTPROTECTIONDEVICE",
    IfcSign => "IFCSIGN",
    IfcVibrationDamper => "IFCVIBRATIONDAMPER",
    IfcVibrationIsolator => "IFCVIBRATIONISOLATOR",

    // Distribution elements (MEP)
    IfcDistributionElement => "IFCDISTRIBUTIONELEMENT",
    IfcDistributionFlowElement => "IFCDISTRIBUTIONFLOWELEMENT",
    IfcDistributionControlElement => "IFCDISTRIBUTIONCONTROLELEMENT",
    IfcDistributionChamberElement => "IFCDISTRIBUTIONCHAMBERELEMENT",
    IfcFlowTerminal => "IFCFLOWTERMINAL",
    IfcFlowSegment => "IFCFLOWSEGMENT",
    IfcFlowFitting => "IFCFLOWFITTING",
    IfcFlowController => "IFCFLOWCONTROLLER",
    IfcFlowMovingDevice => "IFCFLOWMOVINGDEVICE",
    IfcFlowStorageDevice => "IFCFLOWSTORAGEDEVICE",
    IfcFlowTreatmentDevice => "IFCFLOWTREATMENTDEVICE",
    IfcEnergyConversionDevice => "IFCENERGYCONVERSIONDEVICE",

    // Control elements
    IfcActuator => "IFCACTUATOR",
    IfcAlarm => "IFCALARM",
    IfcController => "IFCCONTROLLER",
    IfcFlowInstrument => "IFCFLOWINSTRUMENT",
    IfcProtectiveDeviceTrippingUnit => "IFCPROTECTIVEDEVICETRIPPINGUNIT",
    IfcSensor => "IFCSENSOR",
    IfcUnitaryControlElement => "IFCUNITARYCONTROLELEMENT",

    // Energy conversion devices
    IfcAirToAirHeatRecovery => "IFCAIRTOAIRHEATRECOVERY",
    IfcBoiler => "IFCBOILER",
    IfcBurner => "IFCBURNER",
    IfcChiller => "IFCCHILLER",
    IfcCoil => "IFCCOIL",
    IfcCondenser => "IFCCONDENSER",
    IfcCooledBeam => "IFCCOOLEDBEAM",
    IfcCoolingTower => "IFCCOOLINGTOWER",
    IfcElectricGenerator => "IFCELECTRICGENERATOR",
    IfcElectricMotor => "IFCELECTRICMOTOR",
    IfcEngine => "IFCENGINE",
    IfcEvaporativeCooler => "IFCEVAPORATIVECOOLER",
    IfcEvaporator => "IFCEVAPORATOR",
    IfcHeatExchanger => "IFCHEATEXCHANGER",
    IfcHumidifier => "IFCHUMIDIFIER",
    IfcMotorConnection => "IFCMOTORCONNECTION",
    IfcSolarDevice => "IFCSOLARDEVICE",
    IfcTransformer => "IFCTRANSFORMER",
    IfcTubeBundle => "IFCTUBEBUNDLE",
    IfcUnitaryEquipment => "IFCUNITARYEQUIPMENT",

    // Flow controllers
    IfcAirTerminalBox => "IFCAIRTERMINALBOX",
    IfcDamper => "IFCDAMPER",
    IfcDistributionBoard => "IFCDISTRIBUTIONBOARD",
    IfcElectricDistributionBoard => "IFCELECTRICDISTRIBUTIONBOARD",
    IfcElectricTimeControl => "IFCELECTRICTIMECONTROL",
    IfcFlowMeter => "IFCFLOWMETER",
    IfcProtectiveDevice => "IFCPROTECTIVEDEVICE",
    IfcSwitchingDevice => "IFCSWITCHINGDEVICE",
    IfcValve => "IFCVALVE",

    // Fittings, segments, moving and storage devices
    IfcCableCarrierFitting => "IFCCABLECARRIERFITTING",
    IfcCableFitting => "IFCCABLEFITTING",
    IfcDuctFitting => "IFCDUCTFITTING",
    IfcJunctionBox => "IFCJUNCTIONBOX",
    IfcPipeFitting => "IFCPIPEFITTING",
    IfcCableCarrierSegment => "IFCCABLECARRIERSEGMENT",
    IfcCableSegment => "IFCCABLESEGMENT",
    IfcConveyorSegment => "IFCCONVEYORSEGMENT",
    IfcDuctSegment => "IFCDUCTSEGMENT",
    IfcPipeSegment => "IFCPIPESEGMENT",
    IfcCompressor => "IFCCOMPRESSOR",
    IfcFan => "IFCFAN",
    IfcPump => "IFCPUMP",
    IfcElectricFlowStorageDevice => "IFCELECTRICFLOWSTORAGEDEVICE",
    IfcTank => "IFCTANK",

    // Flow terminals
    IfcAirTerminal => "IFCAIRTERMINAL",
    IfcAudioVisualAppliance => "IFCAUDIOVISUALAPPLIANCE",
    IfcCommunicationsAppliance => "IFCCOMMUNICATIONSAPPLIANCE",
    IfcElectricAppliance => "IFCELECTRICAPPLIANCE",
    IfcFireSuppressionTerminal => "IFCFIRESUPPRESSIONTERMINAL",
    IfcLamp => "IFCLAMP",
    IfcLightFixture => "IFCLIGHTFIXTURE",
    IfcLiquidTerminal => "IFCLIQUIDTERMINAL",
    IfcMedicalDevice => "IFCMEDICALDEVICE",
    IfcMobileTelecommunicationsAppliance => "IFCMOBILETELECOMMUNICATIONSAPPLIANCE",
    IfcOutlet => "IFCOUTLET",
    IfcSanitaryTerminal => "IFCSANITARYTERMINAL",
    IfcSignal => "IFCSIGNAL",
    IfcSpaceHeater => "IFCSPACEHEATER",
    IfcStackTerminal => "IFCSTACKTERMINAL",
    IfcWasteTerminal => "IFCWASTETERMINAL",

    // Flow treatment devices
    IfcDuctSilencer => "IFCDUCTSILENCER",
    IfcElectricFlowTreatmentDevice => "IFCELECTRICFLOWTREATMENTDEVICE",
    IfcFilter => "IFCFILTER",
    IfcInterceptor => "IFCINTERCEPTOR",

    // IFC2X3 electrical and equipment elements
    IfcElectricalElement => "IFCELECTRICALELEMENT",
    IfcElectricDistributionPoint => "IFCELECTRICDISTRIBUTIONPOINT",
    IfcEquipmentElement => "IFCEQUIPMENTELEMENT",

    // Ports
    IfcDistributionPort => "IFCDISTRIBUTIONPORT",

    // Furnishing
    IfcFurnishingElement => "IFCFURNISHINGELEMENT",
    IfcFurniture => "IFCFURNITURE",
    IfcSystemFurnitureElement => "IFCSYSTEMFURNITUREELEMENT",

    // Openings and features
    IfcOpeningElement => "IFCOPENINGELEMENT",
    IfcOpeningStandardCase => "IFCOPENINGSTANDARDCASE",
    IfcVoidingFeature => "IFCVOIDINGFEATURE",
    IfcProjectionElement => "IFCPROJECTIONELEMENT",
    IfcSurfaceFeature => "IFCSURFACEFEATURE",
    IfcEdgeFeature => "IFCEDGEFEATURE",
    IfcChamferEdgeFeature => "IFCCHAMFEREDGEFEATURE",
    IfcRoundedEdgeFeature => "IFCROUNDEDEDGEFEATURE",

    // Structural items and activities
    IfcStructuralCurveMember => "IFCSTRUCTURALCURVEMEMBER",
    IfcStructuralCurveMemberVarying => "IFCSTRUCTURALCURVEMEMBERVARYING",
    IfcStructuralSurfaceMember => "IFCSTRUCTURALSURFACEMEMBER",
    IfcStructuralSurfaceMemberVarying => "IFCSTRUCTURALSURFACEMEMBERVARYING",
    IfcStructuralCurveConnection => "IFCSTRUCTURALCURVECONNECTION",
    IfcStructuralPointConnection => "IFCSTRUCTURALPOINTCONNECTION",
    IfcStructuralSurfaceConnection => "IFCSTRUCTURALSURFACECONNECTION",
    IfcStructuralCurveAction => "IFCSTRUCTURALCURVEACTION",
    IfcStructuralLinearAction => "IFCSTRUCTURALLINEARACTION",
    IfcStructuralLinearActionVarying => "IFCSTRUCTURALLINEARACTIONVARYING",
    IfcStructuralPointAction => "IFCSTRUCTURALPOINTACTION",
    IfcStructuralSurfaceAction => "IFCSTRUCTURALSURFACEACTION",
    IfcStructuralPlanarAction => "IFCSTRUCTURALPLANARACTION",
    IfcStructuralPlanarActionVarying => "IFCSTRUCTURALPLANARACTIONVARYING",
    IfcStructuralCurveReaction => "IFCSTRUCTURALCURVEREACTION",
    IfcStructuralPointReaction => "IFCSTRUCTURALPOINTREACTION",
    IfcStructuralSurfaceReaction => "IFCSTRUCTURALSURFACEREACTION",

    // Other products
    IfcAnnotation => "IFCANNOTATION",
    IfcGrid => "IFCGRID",
    IfcProxy => "IFCPROXY",
    IfcAlignment => "IFCALIGNMENT",
    IfcAlignmentCant => "IFCALIGNMENTCANT",
    IfcAlignmentHorizontal => "IFCALIGNMENTHORIZONTAL",
    IfcAlignmentSegment => "IFCALIGNMENTSEGMENT",
    IfcAlignmentVertical => "IFCALIGNMENTVERTICAL",
    IfcReferent => "IFCREFERENT",
    IfcVehicle => "IFCVEHICLE",

    // IFC4x3 infrastructure elements
    IfcGeotechnicalElement => "IFCGEOTECHNICALELEMENT",
    IfcGeotechnicalAssembly => "IFCGEOTECHNICALASSEMBLY",
    IfcBorehole => "IFCBOREHOLE",
    IfcGeomodel => "IFCGEOMODEL",
    IfcGeoslice => "IFCGEOSLICE",
    IfcSolidStratum => "IFCSOLIDSTRATUM",
    IfcVoidStratum => "IFCVOIDSTRATUM",
    IfcWaterStratum => "IFCWATERSTRATUM",
    IfcEarthworksCut => "IFCEARTHWORKSCUT",
    IfcEarthworksFill => "IFCEARTHWORKSFILL",
    IfcEarthworksElement => "IFCEARTHWORKSELEMENT",
    IfcPavement => "IFCPAVEMENT",
    IfcCourse => "IFCCOURSE",
    IfcKerb => "IFCKERB",
    IfcDeepFoundation => "IFCDEEPFOUNDATION",

    // Relationships
    IfcRelContainedInSpatialStructure => "IFCRELCONTAINEDINSPATIALSTRUCTURE",
    IfcRelAggregates => "IFCRELAGGREGATES",
    IfcRelDefinesByProperties => "IFCRELDEFINESBYPROPERTIES",
    IfcRelDefinesByType => "IFCRELDEFINESBYTYPE",
    IfcRelAssociatesMaterial => "IFCRELASSOCIATESMATERIAL",
    IfcRelVoidsElement => "IFCRELVOIDSELEMENT",
    IfcRelFillsElement => "IFCRELFILLSELEMENT",

    // Properties and quantities
    IfcPropertySet => "IFCPROPERTYSET",
    IfcPropertySingleValue => "IFCPROPERTYSINGLEVALUE",
    IfcElementQuantity => "IFCELEMENTQUANTITY",
    IfcQuantityLength => "IFCQUANTITYLENGTH",
    IfcQuantityArea => "IFCQUANTITYAREA",
    IfcQuantityVolume => "IFCQUANTITYVOLUME",
    IfcQuantityCount => "IFCQUANTITYCOUNT",
    IfcQuantityWeight => "IFCQUANTITYWEIGHT",
    IfcQuantityTime => "IFCQUANTITYTIME",

    // Units
    IfcUnitAssignment => "IFCUNITASSIGNMENT",
    IfcSIUnit => "IFCSIUNIT",
    IfcConversionBasedUnit => "IFCCONVERSIONBASEDUNIT",
    IfcDerivedUnit => "IFCDERIVEDUNIT",
    IfcMeasureWithUnit => "IFCMEASUREWITHUNIT",
    IfcDimensionalExponents => "IFCDIMENSIONALEXPONENTS",
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Check if this type is a spatial structure element (including the project)
    pub fn is_spatial(&self) -> bool {
        self == &IfcType::IfcProject || self.is_spatial_element()
    }

    /// Spatial structure elements that carry a `LongName` at index 7
    pub fn is_spatial_element(&self) -> bool {
        matches!(
            self,
            IfcType::IfcSite
                | IfcType::IfcBuilding
                | IfcType::IfcBuildingStorey
                | IfcType::IfcSpace
                | IfcType::IfcExternalSpatialElement
                | IfcType::IfcFacility
                | IfcType::IfcFacilityPart
                | IfcType::IfcRoad
                | IfcType::IfcRoadPart
                | IfcType::IfcBridge
                | IfcType::IfcBridgePart
                | IfcType::IfcRailway
                | IfcType::IfcRailwayPart
                | IfcType::IfcMarineFacility
                | IfcType::IfcMarinePart
                | IfcType::IfcSpatialZone
        )
    }

    /// Containers skipped by the product sweep: site, building and storey
    pub fn is_spatial_container(&self) -> bool {
        matches!(
            self,
            IfcType::IfcSite | IfcType::IfcBuilding | IfcType::IfcBuildingStorey
        )
    }

    /// Check if this type is a physical product (an `IfcProduct` subtype)
    ///
    /// Covers the instantiable `IfcProduct` subtypes of IFC2X3, IFC4 and IFC4X3.
    /// Unknown types are never products.
    pub fn is_product(&self) -> bool {
        match self {
            IfcType::IfcProject | IfcType::Unknown(_) => false,
            t if t.is_spatial_element() => true,
            t => t.is_element(),
        }
    }

    /// This type followed by its subtypes
    ///
    /// Only direct and standard-case subtypes the enum knows are listed.
    pub fn with_subtypes(&self) -> Vec<IfcType> {
        use IfcType as T;

        let subtypes = match self {
            T::IfcWall => vec![T::IfcWallStandardCase, T::IfcWallElementedCase],
            T::IfcSlab => vec![T::IfcSlabStandardCase, T::IfcSlabElementedCase],
            T::IfcColumn => vec![T::IfcColumnStandardCase],
            T::IfcBeam => vec![T::IfcBeamStandardCase],
            T::IfcPlate => vec![T::IfcPlateStandardCase],
            T::IfcMember => vec![T::IfcMemberStandardCase],
            T::IfcDoor => vec![T::IfcDoorStandardCase],
            T::IfcWindow => vec![T::IfcWindowStandardCase],
            T::IfcOpeningElement => vec![T::IfcOpeningStandardCase],
            T::IfcDeepFoundation => vec![T::IfcPile, T::IfcCaissonFoundation],
            T::IfcFurnishingElement => vec![T::IfcFurniture, T::IfcSystemFurnitureElement],
            T::IfcFastener => vec![T::IfcMechanicalFastener],
            T::IfcStructuralCurveMember => vec![T::IfcStructuralCurveMemberVarying],
            T::IfcStructuralSurfaceMember => vec![T::IfcStructuralSurfaceMemberVarying],
            T::IfcStructuralCurveAction => vec![T::IfcStructuralLinearAction],
            T::IfcStructuralSurfaceAction => vec![T::IfcStructuralPlanarAction],
            _ => Vec::new(),
        };

        std::iter::once(self.clone()).chain(subtypes).collect()
    }

    /// Relationship entities (`IfcRel*`)
    pub fn is_relationship(&self) -> bool {
        matches!(
            self,
            IfcType::IfcRelContainedInSpatialStructure
                | IfcType::IfcRelAggregates
                | IfcType::IfcRelDefinesByProperties
                | IfcType::IfcRelDefinesByType
                | IfcType::IfcRelAssociatesMaterial
                | IfcType::IfcRelVoidsElement
                | IfcType::IfcRelFillsElement
        )
    }

    /// Physical quantity entities (`IfcQuantity*`)
    pub fn is_quantity(&self) -> bool {
        matches!(
            self,
            IfcType::IfcQuantityLength
                | IfcType::IfcQuantityArea
                | IfcType::IfcQuantityVolume
                | IfcType::IfcQuantityCount
                | IfcType::IfcQuantityWeight
                | IfcType::IfcQuantityTime
        )
    }

    /// Types whose attribute list starts with the `IfcRoot` header
    /// (GlobalId, OwnerHistory, Name, Description)
    ///
    /// Unrecognized tags are assumed to be rooted.
    pub fn is_rooted(&self) -> bool {
        match self {
            IfcType::IfcProject
            | IfcType::IfcPropertySet
            | IfcType::IfcElementQuantity
            | IfcType::Unknown(_) => true,
            t => t.is_product() || t.is_relationship(),
        }
    }

    /// Non-spatial products: building, distribution, furnishing and other elements
    fn is_element(&self) -> bool {
        !matches!(
            self,
            IfcType::IfcProject
                | IfcType::IfcRelContainedInSpatialStructure
                | IfcType::IfcRelAggregates
                | IfcType::IfcRelDefinesByProperties
                | IfcType::IfcRelDefinesByType
                | IfcType::IfcRelAssociatesMaterial
                | IfcType::IfcRelVoidsElement
                | IfcType::IfcRelFillsElement
                | IfcType::IfcPropertySet
                | IfcType::IfcPropertySingleValue
                | IfcType::IfcElementQuantity
                | IfcType::IfcQuantityLength
                | IfcType::IfcQuantityArea
                | IfcType::IfcQuantityVolume
                | IfcType::IfcQuantityCount
                | IfcType::IfcQuantityWeight
                | IfcType::IfcQuantityTime
                | IfcType::IfcUnitAssignment
                | IfcType::IfcSIUnit
                | IfcType::IfcConversionBasedUnit
                | IfcType::IfcDerivedUnit
                | IfcType::IfcMeasureWithUnit
                | IfcType::IfcDimensionalExponents
                | IfcType::Unknown(_)
        ) && !self.is_spatial_element()
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoded attribute value
///
/// Represents any value that can appear in an IFC entity's attribute list.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttributeValue {
    /// Null value ($)
    #[default]
    Null,
    /// Derived value (*)
    Derived,
    /// Entity reference (#123)
    EntityRef(EntityId),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value (already unescaped)
    String(String),
    /// Enumeration value (.VALUE.)
    Enum(String),
    /// List of values
    List(Vec<AttributeValue>),
    /// Typed value like IFCLABEL('text')
    TypedValue(String, Vec<AttributeValue>),
}

impl AttributeValue {
    /// Try to get as entity reference
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_string(),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_float(),
            _ => None,
        }
    }

    /// Try to get as enum string
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            AttributeValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null or derived value
    pub fn is_absent(&self) -> bool {
        matches!(self, AttributeValue::Null | AttributeValue::Derived)
    }

    /// Short kind label used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Null => "null",
            AttributeValue::Derived => "derived",
            AttributeValue::EntityRef(_) => "reference",
            AttributeValue::Integer(_) => "integer",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
            AttributeValue::Enum(_) => "enumeration",
            AttributeValue::List(_) => "list",
            AttributeValue::TypedValue(_, _) => "typed value",
        }
    }
}

/// Decoded IFC entity
///
/// Represents a fully decoded IFC entity with its ID, type, and attribute values.
#[derive(Clone, Debug)]
pub struct DecodedEntity {
    /// Entity ID
    pub id: EntityId,
    /// Entity type
    pub ifc_type: IfcType,
    /// Attribute values in order
    pub attributes: Vec<AttributeValue>,
}

impl DecodedEntity {
    /// Most specific declared type, or `None` when the record carries no type token
    pub fn declared_type(&self) -> Option<&IfcType> {
        match &self.ifc_type {
            IfcType::Unknown(name) if name.is_empty() => None,
            ty => Some(ty),
        }
    }

    /// Get attribute at index
    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.attributes.get(index)
    }

    /// Look up an attribute by name using the schema layout of this entity's type
    ///
    /// Null (`$`) and derived (`*`) values read as absent, as does any name the
    /// type does not define.
    pub fn attribute(&self, name: AttributeName) -> Option<&AttributeValue> {
        let index = attribute_index(&self.ifc_type, name)?;
        self.get(index).filter(|v| !v.is_absent())
    }

    /// Like [`DecodedEntity::attribute`], using the layout of a specific schema release
    pub fn attribute_in(&self, schema: SchemaVersion, name: AttributeName) -> Option<&AttributeValue> {
        let index = attribute_index_in(schema, &self.ifc_type, name)?;
        self.get(index).filter(|v| !v.is_absent())
    }

    /// Named attribute as a string
    pub fn attribute_str(&self, name: AttributeName) -> Option<&str> {
        self.attribute(name).and_then(|v| v.as_string())
    }

    /// Named attribute as a non-empty string
    pub fn attribute_text(&self, name: AttributeName) -> Option<&str> {
        self.attribute_str(name).filter(|s| !s.is_empty())
    }

    /// Named attribute as an enumeration token
    pub fn attribute_enum(&self, name: AttributeName) -> Option<&str> {
        self.attribute(name).and_then(|v| v.as_enum())
    }

    /// Named attribute as an entity reference
    pub fn attribute_ref(&self, name: AttributeName) -> Option<EntityId> {
        self.attribute(name).and_then(|v| v.as_entity_ref())
    }

    /// Entity references held by a named list attribute
    pub fn attribute_refs(&self, name: AttributeName) -> Vec<EntityId> {
        self.attribute(name)
            .and_then(|v| v.as_list())
            .map(|list| list.iter().filter_map(|v| v.as_entity_ref()).collect())
            .unwrap_or_default()
    }

    /// The entity's GlobalId, if it has one
    pub fn global_id(&self) -> Option<&str> {
        self.attribute_text(AttributeName::GlobalId)
    }
}

/// Model metadata extracted from the STEP header
#[derive(Clone, Debug, Default)]
pub struct ModelMetadata {
    /// IFC schema version (e.g., "IFC2X3", "IFC4", "IFC4X3")
    pub schema_version: String,
    /// Originating system (CAD application)
    pub originating_system: Option<String>,
    /// Preprocessor version
    pub preprocessor_version: Option<String>,
    /// File name from header
    pub file_name: Option<String>,
    /// Timestamp
    pub timestamp: Option<String>,
}

impl ModelMetadata {
    /// Schema release the file declares
    pub fn schema(&self) -> SchemaVersion {
        SchemaVersion::from_identifier(&self.schema_version)
    }
}
