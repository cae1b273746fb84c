//! Plain text rendering for reconstructed documents.

use crate::model::Document;

use super::RenderOptions;

/// Concatenate the text of the selected pages.
///
/// Each page's text is trimmed and pages left empty after trimming are
/// skipped.
pub fn to_text(doc: &Document, options: &RenderOptions) -> String {
    doc.pages
        .iter()
        .filter(|page| options.page_selection.includes(page.number))
        .map(|page| page.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(&options.page_separator)
}
