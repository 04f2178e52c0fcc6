// src/emit.rs

use std::{io::Write, path::Path, sync::Arc};

use arrow::{
    array::{ArrayRef, Float64Array, StringArray, UInt64Array},
    csv::WriterBuilder,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use tempfile::Builder;
use tracing::info;

use crate::{
    error::{Result, SummaryError},
    stats::{GroupKey, GroupSummary},
    table::{EQUATION_COLUMN, ID_COLUMN, TYPE_COLUMN},
};

pub const MEAN_COLUMN: &str = "Value_mean";
pub const STD_COLUMN: &str = "Value_std";
pub const SIZE_COLUMN: &str = "Value_size";
pub const LB_COLUMN: &str = "Value_lb_quantile";
pub const UB_COLUMN: &str = "Value_ub_quantile";

pub fn summary_schema() -> Schema {
    Schema::new(vec![
        Field::new(TYPE_COLUMN, DataType::Utf8, false),
        Field::new(ID_COLUMN, DataType::Utf8, false),
        Field::new(EQUATION_COLUMN, DataType::Utf8, false),
        Field::new(MEAN_COLUMN, DataType::Float64, true),
        Field::new(STD_COLUMN, DataType::Float64, true),
        Field::new(SIZE_COLUMN, DataType::UInt64, false),
        Field::new(LB_COLUMN, DataType::Float64, true),
        Field::new(UB_COLUMN, DataType::Float64, true),
    ])
}

/// Flatten grouped statistics into one row per key under a single header.
pub fn summary_batch(groups: &[(GroupKey, GroupSummary)]) -> Result<RecordBatch> {
    let text = |f: fn(&GroupKey) -> &str| -> ArrayRef {
        Arc::new(StringArray::from_iter_values(groups.iter().map(|(k, _)| f(k))))
    };
    let float = |f: fn(&GroupSummary) -> Option<f64>| -> ArrayRef {
        Arc::new(groups.iter().map(|(_, s)| f(s)).collect::<Float64Array>())
    };

    let columns: Vec<ArrayRef> = vec![
        text(|k| k.kind.as_str()),
        text(|k| k.id.as_str()),
        text(|k| k.equation.as_str()),
        float(|s| s.mean),
        float(|s| s.std),
        Arc::new(UInt64Array::from_iter_values(groups.iter().map(|(_, s)| s.size))),
        float(|s| s.lb_quantile),
        float(|s| s.ub_quantile),
    ];
    RecordBatch::try_new(Arc::new(summary_schema()), columns).map_err(Into::into)
}

/// Write the summary as UTF-8 CSV to `path`.
///
/// The rows go to a temporary file next to `path` which is renamed over it
/// once fully written; on failure `path` is not touched.
pub fn write_summary(path: &Path, groups: &[(GroupKey, GroupSummary)]) -> Result<()> {
    let batch = summary_batch(groups)?;

    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new().with_header(true).build(&mut buf);
        writer
            .write(&batch)
            .map_err(|e| SummaryError::output(path, e))?;
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = Builder::new()
        .prefix(".stat_")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| SummaryError::output(path, e))?;
    tmp.write_all(&buf)
        .map_err(|e| SummaryError::output(path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| SummaryError::output(path, e))?;
    tmp.persist(path)
        .map_err(|e| SummaryError::output(path, e.error))?;

    info!(path = %path.display(), rows = batch.num_rows(), "wrote summary");
    Ok(())
}
