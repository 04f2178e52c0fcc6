// src/stats/reduce.rs

use std::collections::{BTreeMap, HashMap};

use arrow::{array::StringArray, record_batch::RecordBatch};
use tracing::{debug, warn};

use crate::{
    error::{Result, SummaryError},
    stats::{
        descriptive::{mean, quantile_sorted, sample_std},
        LB_PROBABILITY, UB_PROBABILITY,
    },
    table::{
        utils::{cell, string_column, value_cell},
        EQUATION_COLUMN, FILE_NAME_COLUMN, ID_COLUMN, TYPE_COLUMN, VALUE_COLUMN,
    },
};

const MERGED_TABLE: &str = "<merged table>";

/// One aggregation bucket. Ordering is lexicographic on
/// (`Type`, `ID`, `Equation`), which fixes the output row order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub kind: String,
    pub id: String,
    pub equation: String,
}

impl GroupKey {
    pub fn new(kind: impl Into<String>, id: impl Into<String>, equation: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            equation: equation.into(),
        }
    }
}

/// Statistics of `Value` within one group. Missing values count towards
/// `size` but not towards any other statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub size: u64,
    pub lb_quantile: Option<f64>,
    pub ub_quantile: Option<f64>,
    pub missing: u64,
}

impl GroupSummary {
    fn from_values(mut values: Vec<f64>, size: u64) -> Self {
        let missing = size - values.len() as u64;
        values.sort_by(f64::total_cmp);
        Self {
            mean: mean(&values),
            std: sample_std(&values),
            size,
            lb_quantile: quantile_sorted(&values, LB_PROBABILITY),
            ub_quantile: quantile_sorted(&values, UB_PROBABILITY),
            missing,
        }
    }
}

#[derive(Debug, Default)]
struct Bucket {
    values: Vec<f64>,
    size: u64,
}

/// Output of the grouped reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// Sorted by key.
    pub groups: Vec<(GroupKey, GroupSummary)>,
    pub rows: usize,
    pub missing_values: u64,
}

impl Reduction {
    pub fn total_size(&self) -> u64 {
        self.groups.iter().map(|(_, s)| s.size).sum()
    }
}

/// Partition `table` by (`Type`, `ID`, `Equation`) and summarise `Value`.
///
/// Every row lands in exactly one group; key cells are taken verbatim and a
/// null or NA key cell groups under the empty string. NA values are skipped
/// by the statistics. Any other non-numeric value fails the run.
pub fn reduce_groups(table: &RecordBatch) -> Result<Reduction> {
    let kinds = required(table, TYPE_COLUMN)?;
    let ids = required(table, ID_COLUMN)?;
    let equations = required(table, EQUATION_COLUMN)?;
    let values = required(table, VALUE_COLUMN)?;
    let files = string_column(table, FILE_NAME_COLUMN);

    let mut buckets: BTreeMap<GroupKey, Bucket> = BTreeMap::new();
    let mut file_rows: HashMap<&str, usize> = HashMap::new();

    for row in 0..table.num_rows() {
        let file = files.map(|f| f.value(row)).unwrap_or(MERGED_TABLE);
        let file_row = file_rows.entry(file).or_default();
        *file_row += 1;

        let key = GroupKey::new(
            cell(kinds, row).unwrap_or_default(),
            cell(ids, row).unwrap_or_default(),
            cell(equations, row).unwrap_or_default(),
        );
        let bucket = buckets.entry(key).or_default();
        bucket.size += 1;
        if let Some(v) = parse_value(value_cell(values, row), file, *file_row)? {
            bucket.values.push(v);
        }
    }

    let groups: Vec<(GroupKey, GroupSummary)> = buckets
        .into_iter()
        .map(|(key, b)| (key, GroupSummary::from_values(b.values, b.size)))
        .collect();
    let missing_values: u64 = groups.iter().map(|(_, s)| s.missing).sum();

    if missing_values > 0 {
        warn!(missing_values, "rows without a value were left out of the statistics");
    }
    debug!(rows = table.num_rows(), groups = groups.len(), "reduced");

    Ok(Reduction {
        groups,
        rows: table.num_rows(),
        missing_values,
    })
}

fn required<'a>(table: &'a RecordBatch, column: &str) -> Result<&'a StringArray> {
    string_column(table, column).ok_or_else(|| SummaryError::MissingColumn {
        file: MERGED_TABLE.to_string(),
        column: column.to_string(),
    })
}

/// `Ok(None)` for a missing value.
fn parse_value(raw: Option<&str>, file: &str, row: usize) -> Result<Option<f64>> {
    let Some(s) = raw else {
        return Ok(None);
    };
    match s.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(SummaryError::InvalidValue {
            file: file.to_string(),
            row,
            value: s.to_string(),
        }),
    }
}
