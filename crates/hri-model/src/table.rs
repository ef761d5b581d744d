use std::collections::BTreeSet;

use crate::cell::Cell;
use crate::error::LoadError;

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Count of non-missing cells.
    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_missing()).count()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.len() - self.present_count()
    }

    /// Non-missing numeric values, in row order.
    pub fn numbers(&self) -> Vec<f64> {
        self.cells.iter().filter_map(Cell::as_number).collect()
    }

    /// Non-missing date values, in row order.
    pub fn dates(&self) -> Vec<chrono::NaiveDate> {
        self.cells.iter().filter_map(Cell::as_date).collect()
    }
}

/// An in-memory table: ordered named columns of equal length.
///
/// Column order is preserved from the input file. The table is read-only
/// downstream of loading except for in-place type coercion, which is
/// idempotent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, validating the column invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] when columns have unequal lengths or
    /// duplicate names.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, LoadError> {
        if let Some(first) = columns.first() {
            let expected = first.cells.len();
            for column in &columns {
                if column.cells.len() != expected {
                    return Err(LoadError::Parse(format!(
                        "column {:?} has {} rows, expected {}",
                        column.name,
                        column.cells.len(),
                        expected
                    )));
                }
            }
        }
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(LoadError::Parse(format!(
                    "duplicate column name {:?}",
                    column.name
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |column| column.cells.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.name.clone())
            .collect()
    }

    /// One row rendered cell-by-cell, used for duplicate detection and export.
    pub fn rendered_row(&self, index: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| {
                column
                    .cells
                    .get(index)
                    .map(Cell::render)
                    .unwrap_or_default()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_columns() {
        let columns = vec![
            Column::new("a", vec![Cell::Number(1.0), Cell::Number(2.0)]),
            Column::new("b", vec![Cell::Missing]),
        ];
        assert!(matches!(
            Table::from_columns(columns),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let columns = vec![
            Column::new("a", vec![Cell::Missing]),
            Column::new("a", vec![Cell::Missing]),
        ];
        assert!(matches!(
            Table::from_columns(columns),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn preserves_column_order() {
        let columns = vec![
            Column::new("z", vec![Cell::Missing]),
            Column::new("a", vec![Cell::Missing]),
        ];
        let table = Table::from_columns(columns).unwrap();
        assert_eq!(table.column_names(), vec!["z", "a"]);
        assert_eq!(table.row_count(), 1);
    }
}
