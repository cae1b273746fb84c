//! Raw engine response types.

use super::Block;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which engine operation produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Full analysis: text, tables, and forms
    #[default]
    Analysis,
    /// Text detection only: pages, lines, and words
    Text,
}

impl std::fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseKind::Analysis => write!(f, "analysis"),
            ResponseKind::Text => write!(f, "text"),
        }
    }
}

/// Document metadata reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    /// Declared number of pages
    pub pages: u32,
}

/// One raw response (or one paginated part of a response).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadata>,

    /// Ordered block collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,

    /// Continuation token of a paginated asynchronous result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    /// Present on analysis results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyze_document_model_version: Option<String>,

    /// Present on text-detection results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detect_document_text_model_version: Option<String>,
}

impl RawResponse {
    /// Create a response from blocks and a declared page count.
    pub fn new(blocks: Vec<Block>, pages: u32) -> Self {
        Self {
            document_metadata: Some(DocumentMetadata { pages }),
            blocks: Some(blocks),
            ..Default::default()
        }
    }

    /// Parse a response from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The block collection, or an error if the field was absent.
    pub fn blocks(&self) -> Result<&[Block]> {
        self.blocks
            .as_deref()
            .ok_or_else(|| Error::malformed("response has no Blocks field"))
    }

    /// The declared page count, validated to be at least 1.
    pub fn page_count(&self) -> Result<u32> {
        match self.document_metadata {
            Some(DocumentMetadata { pages }) if pages >= 1 => Ok(pages),
            Some(DocumentMetadata { pages }) => Err(Error::malformed(format!(
                "declared page count must be at least 1, got {}",
                pages
            ))),
            None => Err(Error::malformed("response has no DocumentMetadata field")),
        }
    }

    /// Merge the parts of a paginated result into one response.
    ///
    /// Blocks are concatenated in part order; metadata and model version
    /// markers come from the first part.
    pub fn merge(parts: impl IntoIterator<Item = RawResponse>) -> Result<Self> {
        let mut parts = parts.into_iter();
        let mut merged = parts
            .next()
            .ok_or_else(|| Error::malformed("no response parts to merge"))?;

        let mut count = 1;
        for part in parts {
            let blocks = part
                .blocks
                .ok_or_else(|| Error::malformed(format!("part {} has no Blocks field", count)))?;
            merged.blocks.get_or_insert_with(Vec::new).extend(blocks);
            count += 1;
        }
        merged.next_token = None;

        log::debug!("Merged {} response parts", count);
        Ok(merged)
    }
}
