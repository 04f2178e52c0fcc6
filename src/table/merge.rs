// src/table/merge.rs

use std::{collections::HashSet, sync::Arc};

use arrow::{
    array::{new_null_array, ArrayRef},
    compute::concat_batches,
    datatypes::{DataType, Field, Schema, SchemaRef},
    record_batch::RecordBatch,
};
use tracing::debug;

use crate::{error::Result, table::FILE_NAME_COLUMN};

/// Union of every column seen across `tables`, in first-seen order, with the
/// provenance column kept last.
pub fn union_schema(tables: &[RecordBatch]) -> SchemaRef {
    let mut seen: HashSet<String> = HashSet::new();
    let mut fields: Vec<Field> = Vec::new();
    for table in tables {
        for field in table.schema().fields() {
            if field.name() == FILE_NAME_COLUMN {
                continue;
            }
            if seen.insert(field.name().clone()) {
                fields.push(Field::new(field.name(), DataType::Utf8, true));
            }
        }
    }
    fields.push(Field::new(FILE_NAME_COLUMN, DataType::Utf8, false));
    Arc::new(Schema::new(fields))
}

/// Stack the per-file tables into one, in the order given.
///
/// Columns a file lacks are materialised as null cells for that file's rows.
/// Rows are neither dropped nor deduplicated.
pub fn merge_tables(tables: &[RecordBatch]) -> Result<RecordBatch> {
    let schema = union_schema(tables);

    let mut aligned = Vec::with_capacity(tables.len());
    for table in tables {
        aligned.push(align_to(table, &schema)?);
    }

    let merged = concat_batches(&schema, &aligned)?;
    debug!(
        files = tables.len(),
        rows = merged.num_rows(),
        columns = schema.fields().len(),
        "merged tables"
    );
    Ok(merged)
}

fn align_to(table: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch> {
    let rows = table.num_rows();
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| match table.column_by_name(field.name()) {
            Some(col) => col.clone(),
            None => new_null_array(field.data_type(), rows),
        })
        .collect();
    RecordBatch::try_new(schema.clone(), columns).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::utils::{cell, string_column};
    use arrow::array::StringArray;

    fn table(file: &str, cols: &[(&str, Vec<Option<&str>>)]) -> RecordBatch {
        let rows = cols.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut fields: Vec<Field> = cols
            .iter()
            .map(|(n, _)| Field::new(*n, DataType::Utf8, true))
            .collect();
        fields.push(Field::new(FILE_NAME_COLUMN, DataType::Utf8, false));
        let mut arrays: Vec<ArrayRef> = cols
            .iter()
            .map(|(_, v)| Arc::new(StringArray::from(v.clone())) as ArrayRef)
            .collect();
        arrays.push(Arc::new(StringArray::from(vec![file; rows])));
        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
    }

    #[test]
    fn concatenates_in_order() {
        let a = table("a.csv", &[("Value", vec![Some("1"), Some("2")])]);
        let b = table("b.csv", &[("Value", vec![Some("3")])]);
        let merged = merge_tables(&[a, b]).unwrap();

        assert_eq!(merged.num_rows(), 3);
        let values = string_column(&merged, "Value").unwrap();
        let files = string_column(&merged, FILE_NAME_COLUMN).unwrap();
        assert_eq!(
            (0..3).map(|i| cell(values, i).unwrap()).collect::<Vec<_>>(),
            vec!["1", "2", "3"]
        );
        assert_eq!(files.value(2), "b.csv");
    }

    #[test]
    fn fills_absent_columns_with_nulls() {
        let a = table(
            "a.csv",
            &[("Value", vec![Some("1")]), ("Seed", vec![Some("7")])],
        );
        let b = table(
            "b.csv",
            &[("Value", vec![Some("2")]), ("Chain", vec![Some("c")])],
        );
        let merged = merge_tables(&[a, b]).unwrap();

        let names: Vec<_> = merged
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, vec!["Value", "Seed", "Chain", FILE_NAME_COLUMN]);

        let seed = string_column(&merged, "Seed").unwrap();
        let chain = string_column(&merged, "Chain").unwrap();
        assert_eq!(cell(seed, 0), Some("7"));
        assert_eq!(cell(seed, 1), None);
        assert_eq!(cell(chain, 0), None);
        assert_eq!(cell(chain, 1), Some("c"));
    }

    #[test]
    fn no_tables_gives_empty_table() {
        let merged = merge_tables(&[]).unwrap();
        assert_eq!(merged.num_rows(), 0);
        assert_eq!(merged.schema().fields().len(), 1);
    }
}
