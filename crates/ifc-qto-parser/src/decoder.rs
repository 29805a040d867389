// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Eager entity decoder
//!
//! Every instance record in the DATA section is decoded when the model is
//! opened, so a malformed record fails the parse instead of surfacing later
//! as a missing entity.

use crate::scanner::Records;
use crate::tokenizer::{parse_record, Record};
use ifc_qto_model::{DecodedEntity, ParseError, Result};
use std::ops::Range;
use tracing::debug;

/// Decode all simple instances in `range`, in file order
///
/// Complex (multi-type) instances are skipped.
pub fn decode_entities(content: &str, range: Range<usize>) -> Result<Vec<DecodedEntity>> {
    let mut entities = Vec::new();
    let mut complex = 0usize;

    for (offset, record) in Records::new(content, range) {
        if record.trim().is_empty() {
            continue;
        }

        match parse_record(record) {
            Ok(Record::Simple(entity)) => entities.push(entity),
            Ok(Record::Complex(id)) => {
                debug!(%id, "skipping complex instance");
                complex += 1;
            }
            Err(ParseError::InvalidFormat(msg)) => {
                return Err(ParseError::format(format!("{msg} at byte {offset}")));
            }
            Err(e) => return Err(e),
        }
    }

    debug!(entities = entities.len(), complex, "decoded DATA section");
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_qto_model::{EntityId, IfcType};

    fn decode(data: &str) -> Result<Vec<DecodedEntity>> {
        decode_entities(data, 0..data.len())
    }

    #[test]
    fn test_decodes_in_file_order() {
        let entities = decode(
            "\n#5=IFCWALL('b',$,$,$,$,$,$,$);\n#2=IFCSLAB('a',$,$,$,$,$,$,$);\n",
        )
        .unwrap();
        let ids: Vec<_> = entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(5), EntityId(2)]);
        assert_eq!(entities[1].ifc_type, IfcType::IfcSlab);
    }

    #[test]
    fn test_skips_complex_instances() {
        let entities = decode(
            "#1=(IFCNAMEDUNIT(*,.LENGTHUNIT.) IFCSIUNIT());\n#2=IFCWALL('w',$,$,$,$,$,$,$);\n",
        )
        .unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, EntityId(2));
    }

    #[test]
    fn test_malformed_record_fails() {
        let err = decode("#1=IFCWALL('w',$;\n").unwrap_err();
        assert!(matches!(err, ParseError::EntityParse(EntityId(1), _)));

        let err = decode("  not a record;\n").unwrap_err();
        match err {
            ParseError::InvalidFormat(msg) => assert!(msg.ends_with("at byte 0")),
            other => panic!("Expected format error, got {other:?}"),
        }
    }
}
