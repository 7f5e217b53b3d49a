pub mod lookup;
pub mod properties;
pub mod query;

/// How null results are printed.
pub const NULL_DISPLAY: &str = "N/A";
