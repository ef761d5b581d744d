use chrono::NaiveDate;

/// A single table cell.
///
/// Cells carry their runtime-inferred type: loading and analysis may
/// reinterpret a text column as numbers or dates, and every conversion is
/// total. A value that does not fit the target type becomes [`Cell::Missing`]
/// rather than an error.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Cell {
    Missing,
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Render the cell for display or CSV export.
    ///
    /// Missing renders as the empty string, numbers without trailing zeros,
    /// dates as `YYYY-MM-DD`.
    pub fn render(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Number(value) => format_number(*value),
            Cell::Date(date) => date.format("%Y-%m-%d").to_string(),
            Cell::Text(text) => text.clone(),
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_number(value: f64) -> String {
    let rendered = format!("{value}");
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
