//! Row-indexed tabular view of a reconstructed table.

use crate::model::Table;
use serde::Serialize;

/// A dense, labeled grid built from a sparse [`Table`].
///
/// Row labels are the table's row indices, column labels the sorted union
/// of its column indices. Positions with no cell are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFrame {
    /// Source table id
    pub table_id: String,

    /// Page of the source table (1-indexed)
    pub page: u32,

    /// Row labels, ascending
    pub row_labels: Vec<u32>,

    /// Column labels, ascending
    pub column_labels: Vec<u32>,

    /// `cells[r][c]` is the text at (`row_labels[r]`, `column_labels[c]`)
    pub cells: Vec<Vec<Option<String>>>,
}

impl TableFrame {
    /// Build a frame from a table.
    pub fn from_table(table: &Table) -> Self {
        let row_labels = table.row_labels();
        let column_labels = table.column_labels();

        let cells = table
            .rows
            .values()
            .map(|row| {
                column_labels
                    .iter()
                    .map(|column| row.get(column).cloned())
                    .collect()
            })
            .collect();

        Self {
            table_id: table.id.clone(),
            page: table.page,
            row_labels,
            column_labels,
            cells,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.column_labels.len()
    }

    /// Check if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty()
    }

    /// Look up a cell by its row and column labels.
    pub fn get(&self, row: u32, column: u32) -> Option<&str> {
        let r = self.row_labels.binary_search(&row).ok()?;
        let c = self.column_labels.binary_search(&column).ok()?;
        self.cells[r][c].as_deref()
    }

    /// Render as tab-separated values with a header row of column labels
    /// and a leading column of row labels.
    pub fn to_tsv(&self) -> String {
        let mut lines = Vec::with_capacity(self.height() + 1);

        let header = std::iter::once(String::new())
            .chain(self.column_labels.iter().map(u32::to_string))
            .collect::<Vec<_>>()
            .join("\t");
        lines.push(header);

        for (label, row) in self.row_labels.iter().zip(&self.cells) {
            let line = std::iter::once(label.to_string())
                .chain(
                    row.iter()
                        .map(|cell| cell.as_deref().unwrap_or("").trim().to_string()),
                )
                .collect::<Vec<_>>()
                .join("\t");
            lines.push(line);
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse_table() -> Table {
        let mut table = Table::new("t", 2);
        table.set_cell(1, 1, "A ");
        table.set_cell(1, 3, "B ");
        table.set_cell(5, 2, "C ");
        table
    }

    #[test]
    fn test_from_table() {
        let frame = TableFrame::from_table(&sparse_table());

        assert_eq!(frame.page, 2);
        assert_eq!(frame.row_labels, vec![1, 5]);
        assert_eq!(frame.column_labels, vec![1, 2, 3]);
        assert_eq!(
            frame.cells,
            vec![
                vec![Some("A ".to_string()), None, Some("B ".to_string())],
                vec![None, Some("C ".to_string()), None],
            ]
        );
        assert_eq!(frame.get(5, 2), Some("C "));
        assert_eq!(frame.get(5, 1), None);
        assert_eq!(frame.get(9, 9), None);
    }

    #[test]
    fn test_empty_table() {
        let frame = TableFrame::from_table(&Table::new("t", 1));
        assert!(frame.is_empty());
        assert_eq!(frame.width(), 0);
        assert_eq!(frame.to_tsv(), "");
    }

    #[test]
    fn test_to_tsv() {
        let frame = TableFrame::from_table(&sparse_table());
        assert_eq!(frame.to_tsv(), "\t1\t2\t3\n1\tA\t\tB\n5\t\tC\t");
    }
}
