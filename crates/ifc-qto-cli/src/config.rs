// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line arguments with environment fallbacks.

use clap::Parser;
use ifc_qto_extract::{ExtractOptions, TableFilter};
use std::path::PathBuf;

/// Quantity take-off: one CSV row per physical element of an IFC model
#[derive(Parser, Debug)]
#[command(name = "ifc-qto")]
#[command(version)]
pub struct Args {
    /// IFC file to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write CSV here instead of stdout
    #[arg(short, long, value_name = "PATH", env = "IFC_QTO_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Keep only rows of this class (repeatable)
    #[arg(long = "class", value_name = "IFCCLASS")]
    pub classes: Vec<String>,

    /// Keep only rows with a volume
    #[arg(long)]
    pub with_volume: bool,

    /// Skip elements outside the curated structural classes
    #[arg(long)]
    pub no_catch_all: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info", env = "IFC_QTO_LOG")]
    pub log_level: String,
}

impl Args {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            catch_all: !self.no_catch_all,
        }
    }

    pub fn table_filter(&self) -> TableFilter {
        TableFilter {
            classes: self.classes.clone(),
            with_volume: self.with_volume,
        }
    }
}
