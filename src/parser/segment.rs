//! Page segmentation of the ordered block sequence.

use crate::error::{Error, Result};
use crate::model::{Block, BlockType};

/// Text and text-bearing blocks of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageGroup<'a> {
    /// Block texts, each followed by a single space
    pub text: String,
    /// Blocks that contributed to `text`, in input order
    pub blocks: Vec<&'a Block>,
}

/// Split blocks into page groups at `PAGE` markers.
///
/// Blocks without a `BlockType` are skipped before anything else, so they
/// neither contribute text nor count as the first block. A `PAGE` block
/// closes the current group unless it is the first typed block. Blocks with
/// a type tag this crate doesn't recognize (`BlockType::Other`) still
/// contribute their text. The last group is always emitted, so a sequence
/// without any `PAGE` block yields exactly one group.
pub fn segment_pages(blocks: &[Block]) -> Vec<PageGroup<'_>> {
    let (mut groups, last) = blocks
        .iter()
        .filter(|block| block.block_type.is_some())
        .enumerate()
        .fold(
            (Vec::new(), PageGroup::default()),
            |(mut groups, mut current), (position, block)| {
                if block.is(&BlockType::Page) {
                    if position > 0 {
                        groups.push(std::mem::take(&mut current));
                    }
                } else if let Some(text) = block.text.as_deref() {
                    current.text.push_str(text);
                    current.text.push(' ');
                    current.blocks.push(block);
                }
                (groups, current)
            },
        );
    groups.push(last);
    groups
}

/// Segment blocks and check the group count against the declared page count.
pub fn segment_checked(blocks: &[Block], page_count: u32) -> Result<Vec<PageGroup<'_>>> {
    let groups = segment_pages(blocks);
    if groups.len() != page_count as usize {
        return Err(Error::malformed(format!(
            "found {} page groups but the document declares {} pages",
            groups.len(),
            page_count
        )));
    }
    Ok(groups)
}
