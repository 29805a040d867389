// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

/// CSV column names, in order
pub const CSV_HEADER: [&str; 6] = ["GlobalId", "IfcClass", "TypeName", "Name", "Level", "Volume_m3"];

/// One row of the quantity table
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementRecord {
    /// GlobalId; `None` for entities without one
    #[serde(rename = "GlobalId")]
    pub identity: Option<String>,

    /// Most specific declared type, e.g. `IfcWall`
    #[serde(rename = "IfcClass")]
    pub class: String,

    /// `ObjectType`, else `PredefinedType`, else empty
    #[serde(rename = "TypeName")]
    pub type_name: String,

    /// `Name`, else `LongName`, else empty
    #[serde(rename = "Name")]
    pub name: String,

    /// Label of the containing spatial structure
    #[serde(rename = "Level")]
    pub level: Option<String>,

    /// Explicit volume in cubic meters
    #[serde(rename = "Volume_m3")]
    pub volume_m3: Option<f64>,
}
