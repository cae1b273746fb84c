//! Block-graph reconstruction.
//!
//! The passes run in one direction: the [`BlockIndex`] is built first, then
//! page segmentation, table reconstruction and form reconstruction read from
//! it, and [`ResponseParser`] assembles their output into a document.

mod assembler;
mod form;
mod index;
mod options;
mod segment;
mod table;
mod text;

pub use assembler::{ResponseParser, Stage};
pub use form::{find_value_block, reconstruct_forms};
pub use index::BlockIndex;
pub use options::{Features, ParseOptions};
pub use segment::{segment_checked, segment_pages, PageGroup};
pub use table::{reconstruct_table, reconstruct_tables, tables_by_page, DEFAULT_TABLE_PAGE};
pub use text::{resolve_text, SELECTED_MARK};
