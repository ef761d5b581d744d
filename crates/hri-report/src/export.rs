//! File exports: the working table as CSV and the analysis bundle as JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use hri_model::{AnalysisResult, Table};

/// Write the (possibly type-coerced) table as UTF-8 CSV with a byte-order
/// mark and no index column.
pub fn write_csv_export(table: &Table, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("create export: {}", path.display()))?;
    file.write_all("\u{feff}".as_bytes())
        .context("write byte-order mark")?;
    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record(table.column_names())
        .context("write header row")?;
    for index in 0..table.row_count() {
        writer
            .write_record(table.rendered_row(index))
            .with_context(|| format!("write row {index}"))?;
    }
    writer.flush().context("flush export")?;
    Ok(())
}

/// Write the report text as UTF-8.
pub fn write_report(report: &str, path: &Path) -> Result<()> {
    std::fs::write(path, report).with_context(|| format!("write report: {}", path.display()))
}

/// Write the analysis bundle as pretty JSON for machine consumption.
pub fn write_analysis_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("serialize analysis")?;
    std::fs::write(path, json).with_context(|| format!("write analysis: {}", path.display()))
}
