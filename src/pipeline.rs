// src/pipeline.rs

use std::{path::PathBuf, time::Instant};

use tracing::info;

use crate::{
    config::SummaryConfig,
    discover::discover_inputs,
    emit::write_summary,
    error::Result,
    stats::reduce_groups,
    table::{load_tagged, merge_tables},
};

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub files: usize,
    pub rows: usize,
    pub groups: usize,
    pub missing_values: u64,
    pub output: PathBuf,
}

/// Discover, load, merge, reduce and emit, in one sequential pass.
///
/// Stops at the first error; the output file is only replaced once the whole
/// summary has been computed and written.
#[tracing::instrument(level = "info", skip(config), fields(dir = %config.input_dir.display()))]
pub fn run(config: &SummaryConfig) -> Result<SummaryReport> {
    let start = Instant::now();

    let files = discover_inputs(config)?;
    info!(count = files.len(), "found input files");

    let mut tables = Vec::with_capacity(files.len());
    for path in &files {
        tables.push(load_tagged(path)?);
    }

    let merged = merge_tables(&tables)?;
    drop(tables);
    info!(rows = merged.num_rows(), "merged input tables");

    let reduction = reduce_groups(&merged)?;
    let output = config.output_path();
    write_summary(&output, &reduction.groups)?;

    info!(
        groups = reduction.groups.len(),
        elapsed = ?start.elapsed(),
        "summary complete"
    );
    Ok(SummaryReport {
        files: files.len(),
        rows: reduction.rows,
        groups: reduction.groups.len(),
        missing_values: reduction.missing_values,
        output,
    })
}
