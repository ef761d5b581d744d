//! Sampling-based per-column type coercion.
//!
//! Coercion is total: a cell that does not fit the inferred column type
//! degrades to [`Cell::Missing`], and a column whose sample is inconclusive
//! stays text. Re-running coercion on an already-coerced column is a no-op.

use chrono::NaiveDate;
use tracing::debug;

use hri_model::{Cell, Column, Table};

/// How many leading non-missing values are inspected per column.
pub const SAMPLE_SIZE: usize = 20;

/// Fraction of the sample that must look numeric for the column to coerce.
pub const NUMERIC_THRESHOLD: f64 = 0.8;

/// Date formats attempted, in order. The first format under which the whole
/// sample parses wins for the entire column.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%d/%m/%Y"];

/// Coerce every column of the table in place.
pub fn coerce_table(table: &mut Table) {
    for column in table.columns_mut() {
        coerce_column(column);
    }
}

/// Coerce one column in place using the leading-sample heuristics.
///
/// Only text cells participate; columns already holding numbers or dates are
/// left untouched, which makes the operation idempotent.
pub fn coerce_column(column: &mut Column) {
    let sample: Vec<&str> = column
        .cells
        .iter()
        .filter_map(Cell::as_text)
        .take(SAMPLE_SIZE)
        .collect();
    if sample.is_empty() {
        return;
    }

    let numeric_hits = sample
        .iter()
        .filter(|value| parse_numeric(value).is_some())
        .count();
    if (numeric_hits as f64) >= NUMERIC_THRESHOLD * sample.len() as f64 {
        debug!(column = %column.name, "coercing column to numeric");
        for cell in &mut column.cells {
            if let Cell::Text(text) = cell {
                *cell = match parse_numeric(text) {
                    Some(value) => Cell::Number(value),
                    None => Cell::Missing,
                };
            }
        }
        return;
    }

    if let Some(format) = detect_date_format(&sample) {
        debug!(column = %column.name, format, "coercing column to dates");
        for cell in &mut column.cells {
            if let Cell::Text(text) = cell {
                *cell = match NaiveDate::parse_from_str(text.trim(), format) {
                    Ok(date) => Cell::Date(date),
                    Err(_) => Cell::Missing,
                };
            }
        }
    }
}

/// Parse a numeric literal: optional leading minus, digits with optional
/// thousands separators, optional decimal point.
///
/// Returns the value obtained by stripping separators and parsing directly.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !is_numeric_literal(trimmed) {
        return None;
    }
    trimmed.replace(',', "").parse::<f64>().ok()
}

fn is_numeric_literal(value: &str) -> bool {
    let body = value.strip_prefix('-').unwrap_or(value);
    if body.is_empty() {
        return false;
    }
    let mut digits = 0usize;
    let mut dots = 0usize;
    for ch in body.chars() {
        match ch {
            '0'..='9' => digits += 1,
            ',' => {}
            '.' => {
                dots += 1;
                if dots > 1 {
                    return false;
                }
            }
            _ => return false,
        }
    }
    digits > 0
}

/// Return the first format under which every sampled value parses as a date.
pub fn detect_date_format(sample: &[&str]) -> Option<&'static str> {
    if sample.is_empty() {
        return None;
    }
    DATE_FORMATS.into_iter().find(|format| {
        sample
            .iter()
            .all(|value| NaiveDate::parse_from_str(value.trim(), format).is_ok())
    })
}

/// Ratio of sampled values shaped like digit runs separated by `-` or `/`.
///
/// A cheap content probe used by the mapper's date pass; it does not require
/// the values to be calendar-valid.
pub fn date_shape_ratio(sample: &[&str]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    let hits = sample
        .iter()
        .filter(|value| is_date_shaped(value.trim()))
        .count();
    hits as f64 / sample.len() as f64
}

fn is_date_shaped(value: &str) -> bool {
    let mut separators = 0usize;
    let mut digits = 0usize;
    for ch in value.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '-' | '/' => separators += 1,
            _ => return false,
        }
    }
    digits >= 4 && separators == 2
}
