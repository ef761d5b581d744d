use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resolved association between semantic fields and the columns of one
/// uploaded table. Possibly partial or empty; recomputed per file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<String, String>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column mapped to a field, if any.
    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_mapped(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Assign a column to a field, replacing any previous assignment.
    pub fn assign(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.0.insert(field.into(), column.into());
    }

    /// Assign only when the field has no assignment yet.
    /// Returns true when the assignment was taken.
    pub fn fill(&mut self, field: &str, column: &str) -> bool {
        if self.0.contains_key(field) {
            return false;
        }
        self.0.insert(field.to_string(), column.to_string());
        true
    }

    /// Overlay `other` on top of this mapping; `other` wins on conflicts.
    pub fn merge_over(&mut self, other: &ColumnMapping) {
        for (field, column) in &other.0 {
            self.0.insert(field.clone(), column.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, column)| (field.as_str(), column.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-column metadata computed by the loader after coercion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// True if the column coerced to numeric.
    pub is_numeric: bool,
    /// Ratio of unique values to non-missing values (0.0 to 1.0).
    pub unique_ratio: f64,
    /// Ratio of missing values to total rows (0.0 to 1.0).
    pub null_ratio: f64,
    /// Broad content kind after coercion.
    pub kind: ColumnKind,
}

/// Broad classification of a column's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Date,
    /// Text with a small repeating value set (unique ratio <= 0.3 and
    /// fewer than 50 distinct values).
    Categorical,
    Text,
}

/// Persisted mapping configuration, written next to the application as a
/// small JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    pub column_mapping: ColumnMapping,
    /// RFC 3339 timestamp of the save.
    pub saved_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_keeps_first_assignment() {
        let mut mapping = ColumnMapping::new();
        assert!(mapping.fill("salary", "Monthly Salary"));
        assert!(!mapping.fill("salary", "Bonus"));
        assert_eq!(mapping.column_for("salary"), Some("Monthly Salary"));
    }

    #[test]
    fn merge_over_prefers_overlay() {
        let mut base = ColumnMapping::new();
        base.assign("salary", "Pay");
        base.assign("department", "Dept");
        let mut overlay = ColumnMapping::new();
        overlay.assign("salary", "Base Salary");
        base.merge_over(&overlay);
        assert_eq!(base.column_for("salary"), Some("Base Salary"));
        assert_eq!(base.column_for("department"), Some("Dept"));
    }

    #[test]
    fn config_serializes() {
        let mut mapping = ColumnMapping::new();
        mapping.assign("salary", "Pay");
        let config = MappingConfig {
            column_mapping: mapping,
            saved_at: "2024-06-01T10:00:00+00:00".to_string(),
        };
        let json = serde_json::to_string(&config).expect("serialize config");
        assert!(json.contains("column_mapping"));
        let round: MappingConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(round.column_mapping.column_for("salary"), Some("Pay"));
    }
}
