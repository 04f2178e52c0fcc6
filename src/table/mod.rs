// src/table/mod.rs

pub mod load;
pub mod merge;
pub mod utils;

pub use load::load_tagged;
pub use merge::{merge_tables, union_schema};

pub const TYPE_COLUMN: &str = "Type";
pub const ID_COLUMN: &str = "ID";
pub const EQUATION_COLUMN: &str = "Equation";
pub const VALUE_COLUMN: &str = "Value";

/// Provenance column appended to every loaded row.
pub const FILE_NAME_COLUMN: &str = "file_name";

/// Columns forming the group key, in output order.
pub const KEY_COLUMNS: [&str; 3] = [TYPE_COLUMN, ID_COLUMN, EQUATION_COLUMN];

/// Columns every input file has to carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [TYPE_COLUMN, ID_COLUMN, EQUATION_COLUMN, VALUE_COLUMN];
