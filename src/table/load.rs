// src/table/load.rs

use std::{collections::HashSet, fs, io::Cursor, path::Path, sync::Arc};

use arrow::{
    array::{ArrayRef, StringArray},
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use tracing::debug;

use crate::{
    error::{Result, SummaryError},
    table::{FILE_NAME_COLUMN, REQUIRED_COLUMNS},
};

const BATCH_SIZE: usize = 8192;

/// Parse one comma-separated file into a table of nullable Utf8 columns,
/// plus a trailing `file_name` column holding the file's base name.
///
/// Blank cells come back as nulls. Numeric columns stay text until the
/// reducer coerces them.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_tagged<P: AsRef<Path>>(path: P) -> Result<RecordBatch> {
    let path = path.as_ref();
    let file_name = base_name(path);

    let bytes = fs::read(path)
        .map_err(|e| SummaryError::malformed_with(&file_name, "cannot read file", e))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| SummaryError::malformed_with(&file_name, "not valid UTF-8", e))?;
    if text.trim().is_empty() {
        return Err(SummaryError::malformed(&file_name, "missing header row"));
    }

    let headers = read_headers(&text, &file_name)?;
    let schema = Arc::new(Schema::new(
        headers
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .build(Cursor::new(text.as_bytes()))
        .map_err(|e| SummaryError::malformed_with(&file_name, "cannot open CSV reader", e))?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch =
            batch.map_err(|e| SummaryError::malformed_with(&file_name, "CSV parse error", e))?;
        batches.push(batch);
    }
    let table = concat_batches(&schema, &batches)?;

    require_columns(&table, &file_name)?;
    let tagged = tag_with_file_name(table, &file_name)?;
    debug!(file = %file_name, rows = tagged.num_rows(), columns = headers.len(), "loaded");
    Ok(tagged)
}

/// Final path segment, whatever directory prefix discovery handed us.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn read_headers(text: &str, file_name: &str) -> Result<Vec<String>> {
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(Cursor::new(text.as_bytes()), Some(0))
        .map_err(|e| SummaryError::malformed_with(file_name, "unreadable header row", e))?;

    let headers: Vec<String> = inferred
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(SummaryError::malformed(file_name, "missing header row"));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(SummaryError::malformed(
            file_name,
            format!("duplicate column `{}`", dup),
        ));
    }
    if headers.iter().any(|h| h == FILE_NAME_COLUMN) {
        return Err(SummaryError::malformed(
            file_name,
            format!("column `{}` is reserved", FILE_NAME_COLUMN),
        ));
    }
    Ok(headers)
}

fn require_columns(table: &RecordBatch, file_name: &str) -> Result<()> {
    let schema = table.schema();
    for column in REQUIRED_COLUMNS {
        if schema.index_of(column).is_err() {
            return Err(SummaryError::MissingColumn {
                file: file_name.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn tag_with_file_name(table: RecordBatch, file_name: &str) -> Result<RecordBatch> {
    let rows = table.num_rows();
    let mut fields: Vec<Arc<Field>> = table.schema().fields().iter().cloned().collect();
    fields.push(Arc::new(Field::new(FILE_NAME_COLUMN, DataType::Utf8, false)));

    let mut columns: Vec<ArrayRef> = table.columns().to_vec();
    columns.push(Arc::new(StringArray::from(vec![file_name; rows])));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).map_err(Into::into)
}
