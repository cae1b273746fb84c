//! Table types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Cells of one table row, keyed by 1-based column index.
pub type TableRow = BTreeMap<u32, String>;

/// A reconstructed table.
///
/// Row and column indices are 1-based and not necessarily contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Id of the source `TABLE` block
    pub id: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Row index → column index → cell text
    pub rows: BTreeMap<u32, TableRow>,
}

impl Table {
    /// Create an empty table on a page.
    pub fn new(id: impl Into<String>, page: u32) -> Self {
        Self {
            id: id.into(),
            page,
            rows: BTreeMap::new(),
        }
    }

    /// Store text at a cell position, replacing any previous text.
    pub fn set_cell(&mut self, row: u32, column: u32, text: impl Into<String>) {
        self.rows.entry(row).or_default().insert(column, text.into());
    }

    /// Get the text at a cell position.
    pub fn cell(&self, row: u32, column: u32) -> Option<&str> {
        self.rows.get(&row)?.get(&column).map(String::as_str)
    }

    /// Get a row by its index.
    pub fn row(&self, row: u32) -> Option<&TableRow> {
        self.rows.get(&row)
    }

    /// Number of distinct rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct columns across all rows.
    pub fn column_count(&self) -> usize {
        self.column_labels().len()
    }

    /// Sorted row indices.
    pub fn row_labels(&self) -> Vec<u32> {
        self.rows.keys().copied().collect()
    }

    /// Sorted union of column indices across all rows.
    pub fn column_labels(&self) -> Vec<u32> {
        self.rows
            .values()
            .flat_map(|row| row.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Check if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Get plain text representation (tab-separated cells, one row per line).
    pub fn plain_text(&self) -> String {
        self.rows
            .values()
            .map(|row| {
                row.values()
                    .map(|text| text.trim())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new("t1", 1);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_sparse_table() {
        let mut table = Table::new("t1", 1);
        table.set_cell(1, 1, "Name ");
        table.set_cell(1, 3, "Age ");
        table.set_cell(4, 2, "x ");

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_labels(), vec![1, 4]);
        assert_eq!(table.column_labels(), vec![1, 2, 3]);
        assert_eq!(table.cell(1, 3), Some("Age "));
        assert_eq!(table.cell(2, 1), None);
        assert_eq!(table.cell_count(), 3);
    }

    #[test]
    fn test_set_cell_overwrites() {
        let mut table = Table::new("t1", 1);
        table.set_cell(1, 1, "a");
        table.set_cell(1, 1, "b");
        assert_eq!(table.cell(1, 1), Some("b"));
        assert_eq!(table.cell_count(), 1);
    }

    #[test]
    fn test_plain_text() {
        let mut table = Table::new("t1", 1);
        table.set_cell(1, 1, "A ");
        table.set_cell(1, 2, "B ");
        table.set_cell(2, 1, "C ");
        assert_eq!(table.plain_text(), "A\tB\nC");
    }
}
