//! Text resolution for cells and form elements.

use crate::error::Result;
use crate::model::{Block, BlockType, RelationshipType};

use super::BlockIndex;

/// Token emitted for a checked selection element.
pub const SELECTED_MARK: &str = "X";

/// Resolve the display text of a block from its `CHILD` relationships.
///
/// Words contribute their text and checked selection elements contribute
/// [`SELECTED_MARK`], each followed by a space, in reference order. Every
/// other child contributes nothing. A dangling child reference is an error.
pub fn resolve_text(block: &Block, index: &BlockIndex<'_>) -> Result<String> {
    let mut text = String::new();

    for child_id in block.related_ids(&RelationshipType::Child) {
        let child = index.resolve(child_id, block)?;
        match child.block_type {
            Some(BlockType::Word) => {
                if let Some(word) = child.text.as_deref() {
                    text.push_str(word);
                }
                text.push(' ');
            }
            Some(BlockType::SelectionElement) if child.is_selected() => {
                text.push_str(SELECTED_MARK);
                text.push(' ');
            }
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Relationship, SelectionStatus};

    #[test]
    fn test_words_in_order() {
        let blocks = vec![
            Block::cell("c", 1, 1).with_children(["w1", "w2"]),
            Block::word("w2", "Due"),
            Block::word("w1", "Total"),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        assert_eq!(resolve_text(&blocks[0], &index).unwrap(), "Total Due ");
    }

    #[test]
    fn test_no_relationships() {
        let blocks = vec![Block::cell("c", 1, 1)];
        let index = BlockIndex::build(&blocks).unwrap();
        assert_eq!(resolve_text(&blocks[0], &index).unwrap(), "");
    }

    #[test]
    fn test_selection_elements() {
        let blocks = vec![
            Block::cell("c", 1, 1).with_children(["s1", "s2", "w"]),
            Block::selection("s1", SelectionStatus::Selected),
            Block::selection("s2", SelectionStatus::NotSelected),
            Block::word("w", "Yes"),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        assert_eq!(resolve_text(&blocks[0], &index).unwrap(), "X Yes ");
    }

    #[test]
    fn test_only_child_relationships_count() {
        let blocks = vec![
            Block::key("k")
                .with_relationship(Relationship::value(["v"]))
                .with_children(["w"]),
            Block::value("v"),
            Block::word("w", "Name"),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        assert_eq!(resolve_text(&blocks[0], &index).unwrap(), "Name ");
    }

    #[test]
    fn test_other_children_ignored() {
        let blocks = vec![
            Block::cell("c", 1, 1).with_children(["l", "w"]),
            Block::line("l", "whole line"),
            Block::word("w", "word"),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        assert_eq!(resolve_text(&blocks[0], &index).unwrap(), "word ");
    }

    #[test]
    fn test_dangling_child() {
        let blocks = vec![Block::cell("c", 1, 1).with_children(["ghost"])];
        let index = BlockIndex::build(&blocks).unwrap();
        assert!(resolve_text(&blocks[0], &index).unwrap_err().is_malformed());
    }
}
