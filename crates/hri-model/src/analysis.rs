use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One key performance indicator, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    /// Stable key, e.g. `total_employees`.
    pub key: String,
    /// Display value, already formatted.
    pub value: String,
    pub label: String,
    pub icon: String,
}

impl Kpi {
    pub fn new(key: &str, value: impl Into<String>, label: &str, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
            label: label.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Five-number-style summary of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// One category with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Value distributions keyed by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Distributions {
    /// Value counts in descending count order, keyed by field key.
    pub categories: BTreeMap<String, Vec<CategoryCount>>,
    /// Numeric summary of the salary column when it coerces to numbers.
    pub salary: Option<NumericSummary>,
}

/// A pair of numeric fields with |r| above the strong-correlation cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongPair {
    pub field_a: String,
    pub field_b: String,
    pub r: f64,
}

/// Pairwise Pearson correlations among the numeric mapped fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationData {
    /// Field keys, in the order used by `matrix`.
    pub fields: Vec<String>,
    /// Symmetric matrix with unit diagonal; `matrix[i][j]` is r for
    /// (`fields[i]`, `fields[j]`). `None` marks an undefined coefficient
    /// (fewer than two paired observations, or zero variance).
    pub matrix: Vec<Vec<Option<f64>>>,
    /// Pairs with |r| > 0.5, each unordered pair listed once.
    pub strong: Vec<StrongPair>,
}

/// Full analyzer output. Every part is independently optional; a
/// sub-computation whose inputs are unmapped or empty is simply absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub kpis: Vec<Kpi>,
    pub distributions: Distributions,
    pub correlations: Option<CorrelationData>,
    pub insights: Vec<String>,
    pub warnings: Vec<String>,
}

impl AnalysisResult {
    pub fn kpi(&self, key: &str) -> Option<&Kpi> {
        self.kpis.iter().find(|kpi| kpi.key == key)
    }
}
