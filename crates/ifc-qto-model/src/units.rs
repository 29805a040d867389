// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit categories for scale lookup

use std::fmt;

/// Category of a project unit, as named by the `UnitType` enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitCategory {
    /// `.LENGTHUNIT.`
    Length,
    /// `.AREAUNIT.`
    Area,
    /// `.VOLUMEUNIT.`
    Volume,
    /// `.PLANEANGLEUNIT.`
    PlaneAngle,
}

impl UnitCategory {
    /// The `UnitType` enumeration token for this category
    pub fn unit_type(&self) -> &'static str {
        match self {
            UnitCategory::Length => "LENGTHUNIT",
            UnitCategory::Area => "AREAUNIT",
            UnitCategory::Volume => "VOLUMEUNIT",
            UnitCategory::PlaneAngle => "PLANEANGLEUNIT",
        }
    }

    /// Name of the SI base unit whose scale is 1.0
    pub fn si_base_name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "METRE",
            UnitCategory::Area => "SQUARE_METRE",
            UnitCategory::Volume => "CUBIC_METRE",
            UnitCategory::PlaneAngle => "RADIAN",
        }
    }

    /// Exponent applied to an SI prefix (MILLI on SQUARE_METRE is 1e-6)
    pub fn prefix_exponent(&self) -> i32 {
        match self {
            UnitCategory::Length | UnitCategory::PlaneAngle => 1,
            UnitCategory::Area => 2,
            UnitCategory::Volume => 3,
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit_type())
    }
}

/// Common length scales (file units to meters)
pub mod scales {
    /// Meters to meters (identity)
    pub const METRE: f64 = 1.0;
    /// Millimeters to meters
    pub const MILLIMETRE: f64 = 0.001;
    /// Centimeters to meters
    pub const CENTIMETRE: f64 = 0.01;
    /// Inches to meters
    pub const INCH: f64 = 0.0254;
    /// Feet to meters
    pub const FOOT: f64 = 0.3048;
}
