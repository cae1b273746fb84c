//! Document-level types.

use super::{Block, Page, ResponseKind, Table};
use crate::error::{Error, Result};
use crate::render::{self, TableFrame};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Key → value pairs of a form, in key discovery order.
pub type Forms = IndexMap<String, String>;

/// A normalized, page-indexed document.
///
/// Built once per raw response by [`ResponseParser`](crate::parser::ResponseParser)
/// and read-only thereafter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// One entry per declared page
    pub pages: Vec<Page>,

    /// Reconstructed tables, in discovery order
    pub tables: Vec<Table>,

    /// Form key → value pairs
    pub forms: Forms,
}

impl Document {
    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Text of every page; index = page number - 1.
    pub fn pages_text(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.text.as_str()).collect()
    }

    /// Text-bearing blocks of every page; index = page number - 1.
    pub fn pages_blocks(&self) -> Vec<&[Block]> {
        self.pages.iter().map(|page| page.blocks.as_slice()).collect()
    }

    /// Tables of every page; index = page number - 1.
    pub fn pages_tables(&self) -> Vec<Vec<&Table>> {
        self.pages
            .iter()
            .map(|page| page.tables.iter().filter_map(|&i| self.tables.get(i)).collect())
            .collect()
    }

    /// Tables on one page (1-indexed). Empty for unknown pages.
    pub fn page_tables(&self, page_num: u32) -> Vec<&Table> {
        self.get_page(page_num)
            .map(|page| page.tables.iter().filter_map(|&i| self.tables.get(i)).collect())
            .unwrap_or_default()
    }

    /// Full text: page texts joined by a single space.
    pub fn text(&self) -> String {
        self.pages_text().join(" ")
    }

    /// Number of reconstructed tables.
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// Get a table by discovery index.
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    /// Form key → value pairs.
    pub fn forms(&self) -> &Forms {
        &self.forms
    }

    /// Look up a form value by its key text.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.forms.get(key).map(String::as_str)
    }

    /// Check if the document carries no text, tables, or forms.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Page::is_empty) && self.tables.is_empty() && self.forms.is_empty()
    }

    /// Export one table as a row-indexed frame.
    pub fn export_table(&self, index: usize) -> Result<TableFrame> {
        self.tables
            .get(index)
            .map(TableFrame::from_table)
            .ok_or(Error::TableOutOfRange(index, self.tables.len()))
    }

    /// Write every table to an XLSX workbook, one sheet per table.
    ///
    /// Sheets are named `Table_0`, `Table_1`, ... in discovery order.
    pub fn export_all_tables<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let frames: Vec<TableFrame> = self.tables.iter().map(TableFrame::from_table).collect();
        render::write_xlsx(&frames, path)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Declared page count
    pub page_count: u32,

    /// Kind of response the document was built from
    pub kind: ResponseKind,

    /// Number of blocks in the source response
    pub block_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_page_document() -> Document {
        let mut table = Table::new("t1", 2);
        table.set_cell(1, 1, "A ");

        let mut first = Page::new(1);
        first.text = "Hello ".to_string();
        let mut second = Page::new(2);
        second.text = "World ".to_string();
        second.tables.push(0);

        let mut forms = Forms::new();
        forms.insert("Name ".to_string(), "Alice ".to_string());

        Document {
            metadata: Metadata {
                page_count: 2,
                kind: ResponseKind::Analysis,
                block_count: 0,
            },
            pages: vec![first, second],
            tables: vec![table],
            forms,
        }
    }

    #[test]
    fn test_document_default() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.num_tables(), 0);
    }

    #[test]
    fn test_page_accessors() {
        let doc = two_page_document();
        assert_eq!(doc.pages_text(), vec!["Hello ", "World "]);
        assert_eq!(doc.text(), "Hello  World ");
        assert!(doc.get_page(0).is_none());
        assert!(doc.get_page(3).is_none());
        assert_eq!(doc.get_page(2).map(|p| p.number), Some(2));
    }

    #[test]
    fn test_pages_tables() {
        let doc = two_page_document();
        let per_page = doc.pages_tables();
        assert_eq!(per_page.len(), 2);
        assert!(per_page[0].is_empty());
        assert_eq!(per_page[1][0].id, "t1");
        assert_eq!(doc.page_tables(2).len(), 1);
        assert!(doc.page_tables(9).is_empty());
    }

    #[test]
    fn test_forms_lookup() {
        let doc = two_page_document();
        assert_eq!(doc.form_value("Name "), Some("Alice "));
        assert_eq!(doc.form_value("Name"), None);
    }

    #[test]
    fn test_export_table_out_of_range() {
        let doc = two_page_document();
        assert!(doc.export_table(0).is_ok());
        assert!(matches!(
            doc.export_table(1),
            Err(Error::TableOutOfRange(1, 1))
        ));
    }
}
