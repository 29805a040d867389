// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ifc_qto_model::IfcModel;
use std::sync::Arc;

/// Parse DATA section records wrapped in a minimal IFC4 envelope
pub fn model(data: &str) -> Arc<dyn IfcModel> {
    let content = format!(
        "ISO-10303-21;\nHEADER;\nFILE_DESCRIPTION((''),'2;1');\nFILE_NAME('unit.ifc','',(''),(''),'','','');\nFILE_SCHEMA(('IFC4'));\nENDSEC;\nDATA;\n{data}\nENDSEC;\nEND-ISO-10303-21;\n"
    );
    ifc_qto_parser::parse(content.as_bytes()).expect("fixture should parse")
}
