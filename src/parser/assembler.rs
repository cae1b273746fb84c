//! Document model assembly.
//!
//! Reconstruction moves through a fixed sequence of stages. Each stage only
//! reads the raw response and the output of the previous stage, and nothing
//! escapes until the final [`Document`] is built, so a failure at any stage
//! leaves no partial model behind.

use std::fmt;

use crate::error::Result;
use crate::model::{Document, Forms, Metadata, Page, ResponseKind, Table};
use crate::source::Response;

use super::form::reconstruct_forms;
use super::index::BlockIndex;
use super::options::ParseOptions;
use super::segment::{segment_checked, PageGroup};
use super::table::{reconstruct_tables, tables_by_page};

/// Reconstruction stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Uninitialized,
    Indexed,
    Segmented,
    TablesResolved,
    FormsResolved,
    Ready,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Uninitialized => "UNINITIALIZED",
            Stage::Indexed => "INDEXED",
            Stage::Segmented => "SEGMENTED",
            Stage::TablesResolved => "TABLES_RESOLVED",
            Stage::FormsResolved => "FORMS_RESOLVED",
            Stage::Ready => "READY",
        };
        f.write_str(name)
    }
}

/// Builds a [`Document`] from one engine response.
pub struct ResponseParser<'r> {
    response: &'r Response,
    options: ParseOptions,
}

impl<'r> ResponseParser<'r> {
    /// Create a parser with default options.
    pub fn new(response: &'r Response) -> Self {
        Self::with_options(response, ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(response: &'r Response, options: ParseOptions) -> Self {
        Self { response, options }
    }

    /// Run every stage and return the finished document.
    pub fn parse(&self) -> Result<Document> {
        enter(Stage::Uninitialized);
        let raw = self.response.raw();
        let kind = self.response.kind();
        let blocks = raw.blocks()?;
        let page_count = raw.page_count()?;
        log::debug!(
            "Parsing {} response: {} blocks, {} pages",
            kind,
            blocks.len(),
            page_count
        );

        let index = BlockIndex::build(blocks)?;
        if index.is_empty() {
            log::warn!("{} response has no blocks", kind);
        }
        enter(Stage::Indexed);

        let groups = segment_checked(index.blocks(), page_count)?;
        enter(Stage::Segmented);

        let features = self.options.features;
        let analysis = kind == ResponseKind::Analysis;

        let tables = if analysis && features.tables {
            reconstruct_tables(&index, page_count)?
        } else {
            Vec::new()
        };
        enter(Stage::TablesResolved);

        let forms = if analysis && features.forms {
            reconstruct_forms(&index)?
        } else {
            Forms::new()
        };
        enter(Stage::FormsResolved);

        let document = assemble(kind, page_count, index.len(), groups, tables, forms);
        enter(Stage::Ready);
        Ok(document)
    }
}

fn enter(stage: Stage) {
    log::debug!("Reconstruction stage: {}", stage);
}

fn assemble(
    kind: ResponseKind,
    page_count: u32,
    block_count: usize,
    groups: Vec<PageGroup<'_>>,
    tables: Vec<Table>,
    forms: Forms,
) -> Document {
    let per_page = tables_by_page(&tables, page_count);
    let pages = groups
        .into_iter()
        .zip(per_page)
        .enumerate()
        .map(|(i, (group, tables))| Page {
            number: i as u32 + 1,
            text: group.text,
            blocks: group.blocks.into_iter().cloned().collect(),
            tables,
        })
        .collect();

    Document {
        metadata: Metadata {
            page_count,
            kind,
            block_count,
        },
        pages,
        tables,
        forms,
    }
}
