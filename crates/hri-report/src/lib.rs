//! Report and export generation.
//!
//! Renders analyzer output into a stable plain-text report and writes the
//! table/analysis exports. Report assembly never fails; see
//! [`report::report_or_fallback`].

mod export;
mod report;

pub use export::{write_analysis_json, write_csv_export, write_report};
pub use report::{fallback_report, generate_report, render_report_at, report_or_fallback};
