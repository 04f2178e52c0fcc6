pub mod descriptive;
pub mod reduce;

pub use reduce::{reduce_groups, GroupKey, GroupSummary, Reduction};

/// Lower bound of the central 95% interval.
pub const LB_PROBABILITY: f64 = 0.025;
/// Upper bound of the central 95% interval.
pub const UB_PROBABILITY: f64 = 0.975;
