// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fast section and record scanner using SIMD-accelerated byte searching
//!
//! Locates the HEADER and DATA sections of a STEP physical file and splits
//! them into `;`-terminated records without tokenizing them.

use crate::tokenizer::parse_header_record;
use ifc_qto_model::{AttributeValue, ModelMetadata, ParseError, Result};
use memchr::{memchr2, memmem};
use std::ops::Range;
use tracing::debug;

const MAGIC: &str = "ISO-10303-21;";
const HEADER: &str = "HEADER;";
const DATA: &str = "DATA;";

/// Byte ranges of the two sections, excluding their keywords and `ENDSEC`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sections {
    pub header: Range<usize>,
    pub data: Range<usize>,
}

/// Validate the file envelope and locate its sections
pub fn locate_sections(content: &str) -> Result<Sections> {
    let start = content.len() - content.trim_start().len();
    if !content[start..].starts_with(MAGIC) {
        return Err(ParseError::format("missing ISO-10303-21 magic"));
    }

    let header_start = find_keyword(content, start + MAGIC.len(), HEADER)
        .ok_or_else(|| ParseError::header("missing HEADER section"))?
        + HEADER.len();
    let header_end = find_section_end(content, header_start)
        .ok_or_else(|| ParseError::header("unterminated HEADER section"))?;

    let data_start = find_keyword(content, header_end.end, DATA)
        .ok_or_else(|| ParseError::format("missing DATA section"))?
        + DATA.len();
    let data_end = find_section_end(content, data_start)
        .ok_or_else(|| ParseError::format("unterminated DATA section"))?;

    Ok(Sections {
        header: header_start..header_end.start,
        data: data_start..data_end.start,
    })
}

fn find_keyword(content: &str, from: usize, keyword: &str) -> Option<usize> {
    memmem::find(&content.as_bytes()[from..], keyword.as_bytes()).map(|pos| pos + from)
}

/// Range of the `ENDSEC;` record closing the section that starts at `from`
fn find_section_end(content: &str, from: usize) -> Option<Range<usize>> {
    let mut records = Records::new(content, from..content.len());
    while let Some((offset, record)) = records.next() {
        if record.trim() == "ENDSEC" {
            return Some(offset..records.pos);
        }
    }
    None
}

/// Iterator over `;`-terminated records, aware of quoted strings
///
/// Yields the byte offset of each record and its text without the `;`.
/// Trailing text with no terminator is not yielded.
pub struct Records<'a> {
    content: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Records<'a> {
    pub fn new(content: &'a str, range: Range<usize>) -> Self {
        Self {
            content,
            pos: range.start,
            end: range.end,
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.content.as_bytes();
        let start = self.pos;
        let mut cursor = self.pos;
        let mut in_string = false;

        while cursor < self.end {
            let hit = cursor + memchr2(b'\'', b';', &bytes[cursor..self.end])?;
            match bytes[hit] {
                // A doubled quote toggles twice and stays inside the string
                b'\'' => in_string = !in_string,
                _ if in_string => {}
                _ => {
                    self.pos = hit + 1;
                    return Some((start, &self.content[start..hit]));
                }
            }
            cursor = hit + 1;
        }

        None
    }
}

/// Header information extracted from the HEADER section
#[derive(Clone, Debug, Default)]
pub struct HeaderInfo {
    pub schema_version: Option<String>,
    pub file_name: Option<String>,
    pub timestamp: Option<String>,
    pub preprocessor_version: Option<String>,
    pub originating_system: Option<String>,
}

impl HeaderInfo {
    /// Check the declared schema and convert to model metadata
    pub fn into_metadata(self) -> Result<ModelMetadata> {
        let schema_version = self
            .schema_version
            .ok_or_else(|| ParseError::header("missing FILE_SCHEMA"))?;

        if !schema_version.to_ascii_uppercase().starts_with("IFC") {
            return Err(ParseError::UnsupportedSchema(schema_version));
        }

        Ok(ModelMetadata {
            schema_version,
            originating_system: self.originating_system,
            preprocessor_version: self.preprocessor_version,
            file_name: self.file_name,
            timestamp: self.timestamp,
        })
    }
}

/// Parse the header section records
///
/// Unknown header records are ignored; a record that cannot be tokenized is
/// an `InvalidHeader` error.
pub fn parse_header(content: &str, range: Range<usize>) -> Result<HeaderInfo> {
    let mut info = HeaderInfo::default();

    for (offset, record) in Records::new(content, range) {
        if record.trim().is_empty() {
            continue;
        }

        let (keyword, args) = parse_header_record(record)
            .map_err(|e| ParseError::header(format!("bad record at byte {offset}: {e}")))?;

        match keyword.as_str() {
            // FILE_SCHEMA(('IFC4'))
            "FILE_SCHEMA" => {
                info.schema_version = args
                    .first()
                    .and_then(|v| v.as_list())
                    .and_then(|schemas| schemas.first())
                    .and_then(|v| v.as_string())
                    .map(str::to_string);
            }
            // FILE_NAME(name, time_stamp, (author), (organization),
            //           preprocessor_version, originating_system, authorization)
            "FILE_NAME" => {
                info.file_name = header_text(args.first());
                info.timestamp = header_text(args.get(1));
                info.preprocessor_version = header_text(args.get(4));
                info.originating_system = header_text(args.get(5));
            }
            other => debug!(keyword = other, "skipping header record"),
        }
    }

    Ok(info)
}

fn header_text(value: Option<&AttributeValue>) -> Option<String> {
    value
        .and_then(|v| v.as_string())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_NAME('test.ifc','2024-01-01T00:00:00',('Author'),('Org'),'Preprocessor','App','');
FILE_SCHEMA(('IFC2X3'));
ENDSEC;
DATA;
#1=IFCPROJECT('guid',$,'Project;1',$,$,$,$,$,#2);
#2=IFCUNITASSIGNMENT((#3));
#3=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);
#4=IFCWALL('guid2',$,'It''s; a wall',$,$,$,$,$);
ENDSEC;
END-ISO-10303-21;
"#;

    fn data_records(content: &str) -> Vec<String> {
        let sections = locate_sections(content).unwrap();
        Records::new(content, sections.data)
            .map(|(_, r)| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect()
    }

    #[test]
    fn test_records_respect_strings() {
        let records = data_records(TEST_IFC);
        assert_eq!(records.len(), 4);
        assert!(records[0].starts_with("#1=IFCPROJECT"));
        assert!(records[0].contains("'Project;1'"));
        assert_eq!(records[3], "#4=IFCWALL('guid2',$,'It''s; a wall',$,$,$,$,$)");
    }

    #[test]
    fn test_parse_header() {
        let sections = locate_sections(TEST_IFC).unwrap();
        let info = parse_header(TEST_IFC, sections.header).unwrap();
        assert_eq!(info.schema_version.as_deref(), Some("IFC2X3"));
        assert_eq!(info.file_name.as_deref(), Some("test.ifc"));
        assert_eq!(info.timestamp.as_deref(), Some("2024-01-01T00:00:00"));
        assert_eq!(info.preprocessor_version.as_deref(), Some("Preprocessor"));
        assert_eq!(info.originating_system.as_deref(), Some("App"));

        let metadata = info.into_metadata().unwrap();
        assert_eq!(metadata.schema_version, "IFC2X3");
    }

    #[test]
    fn test_missing_magic() {
        let err = locate_sections("HEADER;\nENDSEC;\nDATA;\nENDSEC;\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_missing_data_section() {
        let content = "ISO-10303-21;\nHEADER;\nFILE_SCHEMA(('IFC4'));\nENDSEC;\nEND-ISO-10303-21;\n";
        let err = locate_sections(content).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_unterminated_header() {
        let err = locate_sections("ISO-10303-21;\nHEADER;\nFILE_SCHEMA(('IFC4'));\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidHeader(_)));
    }

    #[test]
    fn test_schema_checks() {
        let missing = HeaderInfo::default().into_metadata().unwrap_err();
        assert!(matches!(missing, ParseError::InvalidHeader(_)));

        let foreign = HeaderInfo {
            schema_version: Some("AP214".into()),
            ..Default::default()
        };
        assert!(matches!(
            foreign.into_metadata(),
            Err(ParseError::UnsupportedSchema(s)) if s == "AP214"
        ));
    }
}
