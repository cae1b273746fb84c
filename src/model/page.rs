//! Page-level types.

use super::Block;
use serde::{Deserialize, Serialize};

/// A single page of the reconstructed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Concatenated text of the page's text-bearing blocks, each followed by a space
    pub text: String,

    /// Text-bearing blocks of the page, in input order
    pub blocks: Vec<Block>,

    /// Indices into [`Document::tables`](super::Document::tables) of the tables on this page
    pub tables: Vec<usize>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Check if the page carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get the number of text-bearing blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of words in the page text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
