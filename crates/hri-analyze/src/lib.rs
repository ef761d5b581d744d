pub mod analyzer;
pub mod charts;
pub mod stats;

pub use analyzer::{Analyzer, format_currency, group_thousands};
pub use charts::build_charts;
