pub mod config;
pub mod discover;
pub mod emit;
pub mod error;
pub mod pipeline;
pub mod stats;
pub mod table;

pub use config::SummaryConfig;
pub use error::SummaryError;
pub use pipeline::{run, SummaryReport};

#[cfg(test)]
pub(crate) mod test_support;
