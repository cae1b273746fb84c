//! Table reconstruction from `TABLE` / `CELL` blocks.

use crate::error::{Error, Result};
use crate::model::{Block, BlockType, RelationshipType, Table};

use super::text::resolve_text;
use super::BlockIndex;

/// Page assigned to a table whose block carries no page number.
pub const DEFAULT_TABLE_PAGE: u32 = 1;

/// Reconstruct one table from its `TABLE` block.
///
/// Children are resolved through the index; only `CELL` children are kept.
pub fn reconstruct_table(table: &Block, index: &BlockIndex<'_>) -> Result<Table> {
    let page = match table.page {
        Some(page) => page,
        None => {
            log::warn!(
                "Table '{}' has no page number, attaching it to page {}",
                table.id,
                DEFAULT_TABLE_PAGE
            );
            DEFAULT_TABLE_PAGE
        }
    };

    let mut result = Table::new(table.id.clone(), page);
    for child_id in table.related_ids(&RelationshipType::Child) {
        let cell = index.resolve(child_id, table)?;
        if !cell.is(&BlockType::Cell) {
            continue;
        }

        let (row, column) = match (cell.row_index, cell.column_index) {
            (Some(row), Some(column)) => (row, column),
            _ => {
                return Err(Error::malformed(format!(
                    "cell '{}' of table '{}' has no row/column index",
                    cell.id, table.id
                )))
            }
        };
        result.set_cell(row, column, resolve_text(cell, index)?);
    }

    Ok(result)
}

/// Reconstruct every table in input order and check its page number.
pub fn reconstruct_tables(index: &BlockIndex<'_>, page_count: u32) -> Result<Vec<Table>> {
    let tables = index
        .of_type(&BlockType::Table)
        .map(|block| reconstruct_table(block, index))
        .collect::<Result<Vec<_>>>()?;

    if let Some(table) = tables
        .iter()
        .find(|t| t.page == 0 || t.page > page_count)
    {
        return Err(Error::malformed(format!(
            "table '{}' is on page {} but the document has {} pages",
            table.id, table.page, page_count
        )));
    }

    log::debug!("Reconstructed {} tables", tables.len());
    Ok(tables)
}

/// Group table indices by page; index = page number - 1.
pub fn tables_by_page(tables: &[Table], page_count: u32) -> Vec<Vec<usize>> {
    let mut pages = vec![Vec::new(); page_count as usize];
    for (i, table) in tables.iter().enumerate() {
        let slot = (table.page as usize)
            .checked_sub(1)
            .and_then(|i| pages.get_mut(i));
        if let Some(page) = slot {
            page.push(i);
        }
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_blocks() -> Vec<Block> {
        vec![
            Block::page("p1", 1),
            Block::new("t", BlockType::Table)
                .on_page(1)
                .with_children(["c11", "c12", "c21", "c22"]),
            Block::cell("c11", 1, 1).with_children(["a"]),
            Block::cell("c12", 1, 2).with_children(["b"]),
            Block::cell("c21", 2, 1).with_children(["c"]),
            Block::cell("c22", 2, 2).with_children(["d"]),
            Block::word("a", "A"),
            Block::word("b", "B"),
            Block::word("c", "C"),
            Block::word("d", "D"),
        ]
    }

    #[test]
    fn test_two_by_two() {
        let blocks = grid_blocks();
        let index = BlockIndex::build(&blocks).unwrap();
        let table = reconstruct_table(&blocks[1], &index).unwrap();

        assert_eq!(table.page, 1);
        assert_eq!(table.cell(1, 1), Some("A "));
        assert_eq!(table.cell(1, 2), Some("B "));
        assert_eq!(table.cell(2, 1), Some("C "));
        assert_eq!(table.cell(2, 2), Some("D "));
        assert_eq!(table.cell_count(), 4);
    }

    #[test]
    fn test_missing_page_defaults_to_one() {
        let blocks = vec![Block::new("t", BlockType::Table)];
        let index = BlockIndex::build(&blocks).unwrap();
        let table = reconstruct_table(&blocks[0], &index).unwrap();
        assert_eq!(table.page, DEFAULT_TABLE_PAGE);
        assert!(table.is_empty());
    }

    #[test]
    fn test_non_cell_children_skipped() {
        let blocks = vec![
            Block::new("t", BlockType::Table).with_children(["m", "c"]),
            Block::new("m", BlockType::MergedCell),
            Block::cell("c", 1, 1),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        let table = reconstruct_table(&blocks[0], &index).unwrap();
        assert_eq!(table.cell_count(), 1);
        assert_eq!(table.cell(1, 1), Some(""));
    }

    #[test]
    fn test_unknown_child_is_malformed() {
        let blocks = vec![Block::new("t", BlockType::Table).with_children(["ghost"])];
        let index = BlockIndex::build(&blocks).unwrap();
        let err = reconstruct_table(&blocks[0], &index).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_cell_without_index_is_malformed() {
        let blocks = vec![
            Block::new("t", BlockType::Table).with_children(["c"]),
            Block::new("c", BlockType::Cell),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        assert!(reconstruct_table(&blocks[0], &index).is_err());
    }

    #[test]
    fn test_page_out_of_range() {
        let blocks = vec![Block::new("t", BlockType::Table).on_page(3)];
        let index = BlockIndex::build(&blocks).unwrap();
        assert!(reconstruct_tables(&index, 2).unwrap_err().is_malformed());
        assert_eq!(reconstruct_tables(&index, 3).unwrap().len(), 1);
    }

    #[test]
    fn test_tables_by_page() {
        let tables = vec![Table::new("a", 2), Table::new("b", 1), Table::new("c", 2)];
        let pages = tables_by_page(&tables, 3);
        assert_eq!(pages, vec![vec![1], vec![0, 2], vec![]]);
    }
}
