//! Lookup structures over a flat block collection.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{Block, BlockType};

/// Read-only index over the blocks of one response.
#[derive(Debug)]
pub struct BlockIndex<'a> {
    blocks: &'a [Block],
    by_id: HashMap<&'a str, &'a Block>,
    keys: Vec<&'a Block>,
    values: HashMap<&'a str, &'a Block>,
}

impl<'a> BlockIndex<'a> {
    /// Index a block collection.
    ///
    /// Fails if two blocks share an identifier.
    pub fn build(blocks: &'a [Block]) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(blocks.len());
        let mut keys = Vec::new();
        let mut values = HashMap::new();

        for block in blocks {
            if by_id.insert(block.id.as_str(), block).is_some() {
                return Err(Error::malformed(format!(
                    "duplicate block id '{}'",
                    block.id
                )));
            }

            if block.is(&BlockType::KeyValueSet) {
                if block.is_key() {
                    keys.push(block);
                } else {
                    values.insert(block.id.as_str(), block);
                }
            }
        }

        log::debug!(
            "BlockIndex: {} blocks, {} keys, {} values",
            by_id.len(),
            keys.len(),
            values.len()
        );

        Ok(Self {
            blocks,
            by_id,
            keys,
            values,
        })
    }

    /// The indexed blocks, in input order.
    pub fn blocks(&self) -> &'a [Block] {
        self.blocks
    }

    /// Number of indexed blocks.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Look up a block by id.
    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.by_id.get(id).copied()
    }

    /// Look up a block referenced from `from`, failing on a dangling reference.
    pub fn resolve(&self, id: &str, from: &Block) -> Result<&'a Block> {
        self.get(id).ok_or_else(|| {
            Error::malformed(format!(
                "block '{}' references unknown block '{}'",
                from.id, id
            ))
        })
    }

    /// Key blocks of the form, in input order.
    pub fn keys(&self) -> &[&'a Block] {
        &self.keys
    }

    /// Look up a value block by id.
    pub fn value(&self, id: &str) -> Option<&'a Block> {
        self.values.get(id).copied()
    }

    /// Number of value blocks.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Iterate over blocks of one type, in input order.
    pub fn of_type<'t>(&self, block_type: &'t BlockType) -> impl Iterator<Item = &'a Block> + 't
    where
        'a: 't,
    {
        let blocks: &'a [Block] = self.blocks;
        blocks.iter().filter(move |b| b.is(block_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_index() {
        let blocks = vec![
            Block::page("p1", 1),
            Block::word("w1", "Hello"),
            Block::key("k1"),
            Block::value("v1"),
        ];
        let index = BlockIndex::build(&blocks).unwrap();

        assert_eq!(index.len(), 4);
        assert_eq!(index.get("w1").and_then(|b| b.text.as_deref()), Some("Hello"));
        assert!(index.get("missing").is_none());
        assert_eq!(index.keys().len(), 1);
        assert_eq!(index.keys()[0].id, "k1");
        assert!(index.value("v1").is_some());
        assert!(index.value("k1").is_none());
    }

    #[test]
    fn test_duplicate_id() {
        let blocks = vec![Block::word("w1", "a"), Block::word("w1", "b")];
        let err = BlockIndex::build(&blocks).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("w1"));
    }

    #[test]
    fn test_unlabeled_key_value_set_is_value() {
        let blocks = vec![Block::new("kv", BlockType::KeyValueSet)];
        let index = BlockIndex::build(&blocks).unwrap();
        assert!(index.keys().is_empty());
        assert_eq!(index.value_count(), 1);
    }

    #[test]
    fn test_resolve_dangling() {
        let blocks = vec![Block::cell("c1", 1, 1).with_children(["nope"])];
        let index = BlockIndex::build(&blocks).unwrap();
        let err = index.resolve("nope", &blocks[0]).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_of_type() {
        let blocks = vec![
            Block::page("p1", 1),
            Block::new("t1", BlockType::Table),
            Block::page("p2", 2),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        let pages: Vec<_> = index.of_type(&BlockType::Page).map(|b| b.id.as_str()).collect();
        assert_eq!(pages, vec!["p1", "p2"]);
    }
}
