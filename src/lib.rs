//! # blockdoc
//!
//! Reconstruction of page-indexed documents from OCR block graphs.
//!
//! A document-analysis engine describes a scanned document as a flat list of
//! blocks (pages, lines, words, table cells, form keys and values) wired
//! together by id references. This library turns that graph into a
//! [`Document`]: the text of each page, every table as a row/column map,
//! and the form fields as key/value pairs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use blockdoc::{parse_file, render};
//!
//! fn main() -> blockdoc::Result<()> {
//!     // Parse a saved analysis response
//!     let doc = parse_file("analysis.json")?;
//!
//!     println!("{}", render::to_text(&doc, &render::RenderOptions::default()));
//!     for (key, value) in doc.forms() {
//!         println!("{} => {}", key.trim(), value.trim());
//!     }
//!
//!     // One sheet per table
//!     doc.export_all_tables("tables.xlsx")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Page segmentation**: text grouped by page in document order
//! - **Tables**: cells resolved to `row -> column -> text` maps
//! - **Forms**: key text mapped to value text
//! - **Export**: JSON, plain text, and XLSX workbooks
//! - **Batch parsing**: uses Rayon across independent responses

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use detect::{detect_response_kind, response_from_value};
pub use error::{Error, ErrorClass, Result};
pub use model::{
    Block, BlockType, Document, DocumentMetadata, EntityType, Forms, Metadata, Page, RawResponse,
    Relationship, RelationshipType, ResponseKind, SelectionStatus, Table, TableRow,
};
pub use parser::{Features, ParseOptions, ResponseParser};
pub use render::{JsonFormat, PageSelection, RenderOptions, TableFrame};
pub use source::{Action, Backend, Response, ResponseSlots};

use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reconstruct a document from a tagged response.
///
/// # Example
///
/// ```
/// use blockdoc::{parse_response, Block, RawResponse, Response};
///
/// let blocks = vec![
///     Block::page("p1", 1),
///     Block::line("l1", "Invoice 42"),
/// ];
/// let response = Response::Text(RawResponse::new(blocks, 1));
///
/// let doc = parse_response(&response).unwrap();
/// assert_eq!(doc.pages_text(), vec!["Invoice 42 "]);
/// ```
pub fn parse_response(response: &Response) -> Result<Document> {
    ResponseParser::new(response).parse()
}

/// Reconstruct a document from a tagged response with custom options.
///
/// # Example
///
/// ```no_run
/// use blockdoc::{parse_response_with_options, ParseOptions, Response, RawResponse};
///
/// # let response = Response::Analysis(RawResponse::default());
/// let options = ParseOptions::new().with_forms(false);
/// let doc = parse_response_with_options(&response, options).unwrap();
/// assert!(doc.forms.is_empty());
/// ```
pub fn parse_response_with_options(response: &Response, options: ParseOptions) -> Result<Document> {
    ResponseParser::with_options(response, options).parse()
}

/// Parse a JSON response from a string.
///
/// The response kind is detected from the content, and a JSON array is
/// merged as the parts of one paginated response.
pub fn parse_str(json: &str) -> Result<Document> {
    parse_str_with_options(json, ParseOptions::default())
}

/// Parse a JSON response from a string with custom options.
pub fn parse_str_with_options(json: &str, options: ParseOptions) -> Result<Document> {
    let value = serde_json::from_str(json)?;
    let response = detect::response_from_value(value)?;
    parse_response_with_options(&response, options)
}

/// Parse a JSON response from bytes.
pub fn parse_slice(data: &[u8]) -> Result<Document> {
    let value = serde_json::from_slice(data)?;
    let response = detect::response_from_value(value)?;
    parse_response(&response)
}

/// Parse a JSON response from a reader.
///
/// # Example
///
/// ```no_run
/// use blockdoc::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("analysis.json").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let value = serde_json::from_reader(reader)?;
    let response = detect::response_from_value(value)?;
    parse_response(&response)
}

/// Parse a JSON response file.
///
/// # Example
///
/// ```no_run
/// use blockdoc::parse_file;
///
/// let doc = parse_file("analysis.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a JSON response file with custom options.
///
/// # Example
///
/// ```no_run
/// use blockdoc::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().text_only();
/// let doc = parse_file_with_options("analysis.json", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    log::debug!("Reading response from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    let value = serde_json::from_reader(reader)?;
    let response = detect::response_from_value(value)?;
    parse_response_with_options(&response, options)
}

/// Reconstruct several independent responses.
///
/// Runs on the Rayon thread pool when `options.parallel` is set. Results
/// are returned in input order, and one failure doesn't affect the others.
pub fn parse_many(responses: &[Response], options: &ParseOptions) -> Vec<Result<Document>> {
    let parse = |response: &Response| parse_response_with_options(response, options.clone());

    if options.parallel {
        responses.par_iter().map(parse).collect()
    } else {
        responses.iter().map(parse).collect()
    }
}
