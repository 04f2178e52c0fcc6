use arrow::{
    array::{Array, StringArray},
    record_batch::RecordBatch,
};

/// Cell contents read as missing, the same set pandas' `read_csv` uses by
/// default. Matched against the untrimmed text.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_na(s: &str) -> bool {
    NA_TOKENS.contains(&s)
}

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Borrow `name` as a string column. Every column is loaded as Utf8, so a
/// `None` here means the column is absent.
pub fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|col| col.as_any().downcast_ref::<StringArray>())
}

/// Cell text exactly as parsed, or `None` for a null or NA cell.
pub fn cell(arr: &StringArray, row: usize) -> Option<&str> {
    if arr.is_null(row) {
        return None;
    }
    let s = arr.value(row);
    (!is_na(s)).then_some(s)
}

/// Cell text cleaned for numeric coercion, or `None` when missing.
pub fn value_cell(arr: &StringArray, row: usize) -> Option<&str> {
    if arr.is_null(row) {
        return None;
    }
    let s = clean_str(arr.value(row));
    (!is_na(s)).then_some(s)
}
