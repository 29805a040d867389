// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-QTO - quantity take-off for IFC files
//!
//! Reads an IFC (STEP) file, extracts one row per physical element and writes
//! the table as CSV with the columns
//! `GlobalId,IfcClass,TypeName,Name,Level,Volume_m3`.
//!
//! Logs go to stderr so CSV on stdout stays clean.

use anyhow::{Context, Result};
use clap::Parser;
use ifc_qto_extract::extract;
use std::io::{IsTerminal, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let model = ifc_qto_parser::open(&args.input)
        .with_context(|| format!("failed to read IFC file {}", args.input.display()))?;

    let metadata = model.metadata();
    info!(
        input = %args.input.display(),
        schema = %metadata.schema_version,
        originating_system = metadata.originating_system.as_deref().unwrap_or(""),
        entities = model.resolver().entity_count(),
        "opened model"
    );

    let mut table = extract(model.as_ref(), &args.extract_options());
    let filter = args.table_filter();
    if !filter.is_empty() {
        table = table.filter(&filter);
    }

    let csv = table.to_csv().context("failed to render CSV")?;
    match &args.output {
        Some(path) => std::fs::write(path, &csv)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&csv).context("failed to write CSV to stdout")?;
            stdout.flush().context("failed to write CSV to stdout")?;
        }
    }

    info!(
        rows_written = table.len(),
        rows_with_volume = table.volume_count(),
        classes_written = table.classes().len(),
        "wrote quantity table"
    );
    Ok(())
}
