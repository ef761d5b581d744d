use serde::{Deserialize, Serialize};

use crate::analysis::{CategoryCount, NumericSummary};

/// Least-squares trend line for a scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

/// Data behind one chart. The presentation layer decides how to draw it;
/// the core only decides what is worth showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ChartData {
    /// Category counts, e.g. employees per department.
    CategoryCounts {
        field: String,
        counts: Vec<CategoryCount>,
    },
    /// Binned numeric distribution with an optional mean marker.
    Histogram {
        field: String,
        /// Bin edges; `counts.len() + 1` entries.
        edges: Vec<f64>,
        counts: Vec<usize>,
        mean: Option<f64>,
    },
    /// Box-style numeric summary.
    Summary {
        field: String,
        summary: NumericSummary,
    },
    /// Paired observations with an optional fitted trend.
    Scatter {
        x_field: String,
        y_field: String,
        points: Vec<[f64; 2]>,
        trend: Option<TrendLine>,
        r: Option<f64>,
    },
}

/// A renderable chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub available: bool,
    pub data: ChartData,
}
