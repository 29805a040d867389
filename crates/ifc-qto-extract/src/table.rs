// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output table assembly, filtering and CSV export

use crate::error::ExportError;
use crate::record::{ElementRecord, CSV_HEADER};
use std::cmp::Ordering;
use std::io;

/// Sorted quantity table
///
/// Records are ordered by `(class, level, name)`; a record's position is its
/// row index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputTable {
    records: Vec<ElementRecord>,
}

impl OutputTable {
    /// Normalize volumes and sort records into a table
    ///
    /// NaN volumes become `None`. The sort is stable and places rows
    /// without a level after every row of the same class that has one.
    pub fn assemble(mut records: Vec<ElementRecord>) -> Self {
        for record in &mut records {
            record.volume_m3 = record.volume_m3.filter(|v| !v.is_nan());
        }
        records.sort_by(compare_rows);
        Self { records }
    }

    pub fn records(&self) -> &[ElementRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ElementRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows with their sequential index
    pub fn rows(&self) -> impl Iterator<Item = (usize, &ElementRecord)> {
        self.records.iter().enumerate()
    }

    /// Number of rows that carry a volume
    pub fn volume_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.volume_m3.is_some())
            .count()
    }

    /// Distinct classes, sorted
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.records.iter().map(|r| r.class.as_str()).collect();
        classes.dedup();
        classes
    }

    /// Rows matching `filter`, reindexed, in table order
    pub fn filter(&self, filter: &TableFilter) -> OutputTable {
        OutputTable {
            records: self
                .records
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect(),
        }
    }

    /// Write the table as CSV; absent values become empty cells
    ///
    /// The header row is written even for an empty table.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut csv = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv.write_record(CSV_HEADER)?;
        for record in &self.records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// CSV rendering as bytes
    pub fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(buffer)
    }
}

fn compare_rows(a: &ElementRecord, b: &ElementRecord) -> Ordering {
    a.class
        .cmp(&b.class)
        .then_with(|| nulls_last(a.level.as_deref(), b.level.as_deref()))
        .then_with(|| a.name.cmp(&b.name))
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Row selection for presentation
#[derive(Clone, Debug, Default)]
pub struct TableFilter {
    /// Keep only these classes; empty keeps all
    pub classes: Vec<String>,
    /// Keep only rows with a volume
    pub with_volume: bool,
}

impl TableFilter {
    pub fn matches(&self, record: &ElementRecord) -> bool {
        (self.classes.is_empty() || self.classes.iter().any(|c| *c == record.class))
            && (!self.with_volume || record.volume_m3.is_some())
    }

    /// True when the filter keeps every row
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && !self.with_volume
    }
}
