//! Per-column content profiles computed after coercion.

use std::collections::{BTreeMap, BTreeSet};

use hri_model::{Cell, ColumnKind, ColumnProfile, Table};

/// Unique-value ratio at or below which a text column counts as categorical.
const CATEGORICAL_UNIQUE_RATIO: f64 = 0.3;

/// Distinct-value count above which a text column is never categorical.
const CATEGORICAL_MAX_DISTINCT: usize = 50;

/// Profile every column of a coerced table, keyed by column name.
pub fn build_column_profiles(table: &Table) -> BTreeMap<String, ColumnProfile> {
    let row_count = table.row_count();
    let mut profiles = BTreeMap::new();
    for column in table.columns() {
        let mut present = 0usize;
        let mut numeric = 0usize;
        let mut dates = 0usize;
        let mut uniques: BTreeSet<String> = BTreeSet::new();
        for cell in &column.cells {
            match cell {
                Cell::Missing => continue,
                Cell::Number(_) => numeric += 1,
                Cell::Date(_) => dates += 1,
                Cell::Text(_) => {}
            }
            present += 1;
            uniques.insert(cell.render());
        }
        let null_ratio = if row_count == 0 {
            1.0
        } else {
            (row_count - present) as f64 / row_count as f64
        };
        let unique_ratio = if present == 0 {
            0.0
        } else {
            uniques.len() as f64 / present as f64
        };
        let is_numeric = present > 0 && numeric == present;
        let kind = if is_numeric {
            ColumnKind::Numeric
        } else if present > 0 && dates == present {
            ColumnKind::Date
        } else if present > 0
            && unique_ratio <= CATEGORICAL_UNIQUE_RATIO
            && uniques.len() < CATEGORICAL_MAX_DISTINCT
        {
            ColumnKind::Categorical
        } else {
            ColumnKind::Text
        };
        profiles.insert(
            column.name.clone(),
            ColumnProfile {
                is_numeric,
                unique_ratio,
                null_ratio,
                kind,
            },
        );
    }
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use hri_model::Column;

    fn table(columns: Vec<Column>) -> Table {
        Table::from_columns(columns).unwrap()
    }

    #[test]
    fn numeric_column_is_profiled_numeric() {
        let table = table(vec![Column::new(
            "salary",
            vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Missing],
        )]);
        let profiles = build_column_profiles(&table);
        let profile = &profiles["salary"];
        assert!(profile.is_numeric);
        assert_eq!(profile.kind, ColumnKind::Numeric);
        assert!((profile.null_ratio - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn repeating_text_is_categorical() {
        let cells: Vec<Cell> = (0..30)
            .map(|idx| Cell::Text(if idx % 2 == 0 { "Sales" } else { "Ops" }.to_string()))
            .collect();
        let table = table(vec![Column::new("dept", cells)]);
        let profiles = build_column_profiles(&table);
        assert_eq!(profiles["dept"].kind, ColumnKind::Categorical);
    }

    #[test]
    fn distinct_text_stays_text() {
        let cells: Vec<Cell> = (0..30).map(|idx| Cell::Text(format!("person-{idx}"))).collect();
        let table = table(vec![Column::new("name", cells)]);
        let profiles = build_column_profiles(&table);
        assert_eq!(profiles["name"].kind, ColumnKind::Text);
    }
}
