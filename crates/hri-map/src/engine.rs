//! Mapping engine implementation.
//!
//! Scoring, not first-match: every (column, field) pair gets a score and the
//! best nonzero field wins the column, subject to first-seen-wins across
//! columns. A content-based date pass then fills the date fields for columns
//! whose names give no semantic hint.

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use hri_ingest::{date_shape_ratio, detect_date_format};
use hri_model::{Cell, Column, ColumnMapping, FieldDef, Table};

/// Score contributed by each matching pattern.
pub const PATTERN_SCORE: u32 = 3;
/// Score contributed by each keyword found as a substring.
pub const KEYWORD_SCORE: u32 = 1;

/// Sample size for the content-based date pass.
const DATE_SAMPLE_SIZE: usize = 10;
/// Fraction of the sample that must be date-shaped for the date pass.
const DATE_SHAPE_THRESHOLD: f64 = 0.7;

struct CompiledField {
    key: String,
    patterns: Vec<Regex>,
    keywords: Vec<String>,
}

/// Engine for mapping table columns to semantic catalog fields.
///
/// Built once per catalog; scoring is a pure function of the column name and
/// the catalog, with no hidden state.
pub struct MappingEngine {
    fields: Vec<CompiledField>,
}

impl MappingEngine {
    /// Compile a catalog into an engine. Patterns that fail to compile are
    /// skipped with a warning, never fatal.
    pub fn new(catalog: &[FieldDef]) -> Self {
        let fields = catalog
            .iter()
            .map(|field| {
                let patterns = field
                    .patterns
                    .iter()
                    .filter_map(|pattern| {
                        match RegexBuilder::new(pattern).case_insensitive(true).build() {
                            Ok(regex) => Some(regex),
                            Err(error) => {
                                warn!(field = %field.key, pattern, %error, "skipping unusable pattern");
                                None
                            }
                        }
                    })
                    .collect();
                CompiledField {
                    key: field.key.clone(),
                    patterns,
                    keywords: field
                        .keywords
                        .iter()
                        .map(|keyword| keyword.to_lowercase())
                        .collect(),
                }
            })
            .collect();
        Self { fields }
    }

    /// Engine over the built-in catalog.
    pub fn with_default_catalog() -> Self {
        Self::new(&crate::catalog::default_catalog())
    }

    /// Score one column name against one field key. Zero for unknown fields.
    pub fn score(&self, column_name: &str, field_key: &str) -> u32 {
        let normalized = column_name.to_lowercase();
        self.fields
            .iter()
            .find(|field| field.key == field_key)
            .map_or(0, |field| score_field(&normalized, field))
    }

    /// Detect the best-effort column mapping for a table.
    ///
    /// Never fails; the result may be partial or empty.
    pub fn detect(&self, table: &Table) -> ColumnMapping {
        let mut mapping = ColumnMapping::new();

        // Pass 1: name-based scoring, columns in left-to-right order. The
        // first column to claim a field keeps it; later columns never
        // displace an earlier, possibly weaker match.
        for column in table.columns() {
            let normalized = column.name.to_lowercase();
            let mut best: Option<(&str, u32)> = None;
            for field in &self.fields {
                let score = score_field(&normalized, field);
                if score == 0 {
                    continue;
                }
                if best.is_none_or(|(_, top)| score > top) {
                    best = Some((field.key.as_str(), score));
                }
            }
            if let Some((field_key, score)) = best {
                if mapping.fill(field_key, &column.name) {
                    debug!(column = %column.name, field = field_key, score, "mapped by name");
                }
            }
        }

        // Pass 2: content-based date detection. Adds mappings only; never
        // overwrites assignments from pass 1.
        for column in table.columns() {
            if !is_date_like(column) {
                continue;
            }
            if mapping.fill("hire_date", &column.name) {
                debug!(column = %column.name, "date content filled hire_date");
            } else if mapping.fill("review_date", &column.name) {
                debug!(column = %column.name, "date content filled review_date");
            }
        }

        mapping
    }
}

fn score_field(normalized_name: &str, field: &CompiledField) -> u32 {
    let mut score = 0;
    for pattern in &field.patterns {
        if pattern.is_match(normalized_name) {
            score += PATTERN_SCORE;
        }
    }
    for keyword in &field.keywords {
        if normalized_name.contains(keyword.as_str()) {
            score += KEYWORD_SCORE;
        }
    }
    score
}

/// A column is date-like when its cells already coerced to dates, or when a
/// leading sample of its text looks like dates by shape or by format parse.
fn is_date_like(column: &Column) -> bool {
    let present = column.present_count();
    if present == 0 {
        return false;
    }
    let date_cells = column
        .cells
        .iter()
        .filter(|cell| matches!(cell, Cell::Date(_)))
        .count();
    if date_cells == present {
        return true;
    }
    let sample: Vec<&str> = column
        .cells
        .iter()
        .filter_map(Cell::as_text)
        .take(DATE_SAMPLE_SIZE)
        .collect();
    if sample.is_empty() {
        return false;
    }
    date_shape_ratio(&sample) > DATE_SHAPE_THRESHOLD || detect_date_format(&sample).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hri_model::FieldDef;

    fn table_of(names: &[&str]) -> Table {
        let columns = names
            .iter()
            .map(|name| Column::new(*name, vec![Cell::Text("x".to_string())]))
            .collect();
        Table::from_columns(columns).unwrap()
    }

    #[test]
    fn pattern_and_keyword_scores_accumulate() {
        let engine = MappingEngine::with_default_catalog();
        // "salary" matches the `salary` pattern (+3) and both the "salary"
        // and "pay" keywords are substring-checked; only "salary" hits (+1).
        assert_eq!(engine.score("salary", "salary"), PATTERN_SCORE + KEYWORD_SCORE);
        assert_eq!(engine.score("quarter", "salary"), 0);
    }

    #[test]
    fn invalid_pattern_is_skipped_not_fatal() {
        let catalog = vec![FieldDef::new("broken", &["[unclosed"], &["broke"])];
        let engine = MappingEngine::new(&catalog);
        assert_eq!(engine.score("broken thing", "broken"), KEYWORD_SCORE);
    }

    #[test]
    fn first_seen_column_keeps_the_field() {
        let engine = MappingEngine::with_default_catalog();
        let mapping = engine.detect(&table_of(&["Pay", "Base Salary"]));
        assert_eq!(mapping.column_for("salary"), Some("Pay"));
    }

    #[test]
    fn zero_scores_assign_nothing() {
        let engine = MappingEngine::with_default_catalog();
        let mapping = engine.detect(&table_of(&["x1", "x2", "x3"]));
        assert!(mapping.is_empty());
    }

    #[test]
    fn date_cells_fill_hire_then_review() {
        let engine = MappingEngine::with_default_catalog();
        let date = chrono::NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        let columns = vec![
            Column::new("c1", vec![Cell::Date(date)]),
            Column::new("c2", vec![Cell::Date(date)]),
            Column::new("c3", vec![Cell::Date(date)]),
        ];
        let table = Table::from_columns(columns).unwrap();
        let mapping = engine.detect(&table);
        assert_eq!(mapping.column_for("hire_date"), Some("c1"));
        assert_eq!(mapping.column_for("review_date"), Some("c2"));
        // Third date column has nowhere left to go.
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn date_pass_never_overwrites_name_match() {
        let engine = MappingEngine::with_default_catalog();
        let date = chrono::NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        let columns = vec![
            Column::new("Hire Date", vec![Cell::Date(date)]),
            Column::new("Other Dates", vec![Cell::Date(date)]),
        ];
        let table = Table::from_columns(columns).unwrap();
        let mapping = engine.detect(&table);
        assert_eq!(mapping.column_for("hire_date"), Some("Hire Date"));
        // The date pass walks columns in order; "Hire Date" is the first
        // date-like column, so it also claims the review slot.
        assert_eq!(mapping.column_for("review_date"), Some("Hire Date"));
    }
}
