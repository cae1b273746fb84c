//! Form reconstruction from `KEY_VALUE_SET` blocks.

use crate::error::{Error, Result};
use crate::model::{Block, Forms, RelationshipType};

use super::text::resolve_text;
use super::BlockIndex;

/// Find the value block paired with a key block.
///
/// When the `VALUE` relationships list several ids, the last one wins.
pub fn find_value_block<'a>(key: &Block, index: &BlockIndex<'a>) -> Result<&'a Block> {
    let ids: Vec<&str> = key.related_ids(&RelationshipType::Value).collect();
    let value_id = ids.last().ok_or_else(|| {
        Error::malformed(format!("key block '{}' has no VALUE relationship", key.id))
    })?;
    if ids.len() > 1 {
        log::warn!(
            "Key block '{}' lists {} values, using '{}'",
            key.id,
            ids.len(),
            value_id
        );
    }

    index.value(value_id).ok_or_else(|| {
        Error::malformed(format!(
            "key block '{}' references '{}', which is not a value block",
            key.id, value_id
        ))
    })
}

/// Build the key → value map of the form.
///
/// Keys are visited in input order. Two keys with identical text collapse
/// into one entry holding the later value.
pub fn reconstruct_forms(index: &BlockIndex<'_>) -> Result<Forms> {
    let mut forms = Forms::with_capacity(index.keys().len());

    for key in index.keys() {
        let value = find_value_block(key, index)?;
        let key_text = resolve_text(key, index)?;
        let value_text = resolve_text(value, index)?;

        if let Some(previous) = forms.insert(key_text, value_text) {
            log::debug!(
                "Form key of block '{}' overwrote earlier value {:?}",
                key.id,
                previous
            );
        }
    }

    log::debug!("Reconstructed {} form fields", forms.len());
    Ok(forms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Relationship, SelectionStatus};

    fn key_value(key_id: &str, key_word: &str, value_id: &str, value_word: &str) -> Vec<Block> {
        let kw = format!("{}-w", key_id);
        let vw = format!("{}-w", value_id);
        vec![
            Block::key(key_id)
                .with_relationship(Relationship::value([value_id]))
                .with_children([kw.clone()]),
            Block::value(value_id).with_children([vw.clone()]),
            Block::word(kw, key_word),
            Block::word(vw, value_word),
        ]
    }

    #[test]
    fn test_single_pair() {
        let blocks = key_value("k", "Name", "v", "Alice");
        let index = BlockIndex::build(&blocks).unwrap();
        let forms = reconstruct_forms(&index).unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms.get("Name ").map(String::as_str), Some("Alice "));
    }

    #[test]
    fn test_insertion_order_follows_keys() {
        let mut blocks = key_value("k2", "Zip", "v2", "1000");
        blocks.extend(key_value("k1", "City", "v1", "Bern"));
        let index = BlockIndex::build(&blocks).unwrap();
        let forms = reconstruct_forms(&index).unwrap();
        let keys: Vec<_> = forms.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Zip ", "City "]);
    }

    #[test]
    fn test_duplicate_key_text_overwrites() {
        let mut blocks = key_value("k1", "Date", "v1", "first");
        blocks.extend(key_value("k2", "Date", "v2", "second"));
        let index = BlockIndex::build(&blocks).unwrap();
        let forms = reconstruct_forms(&index).unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms["Date "], "second ");
    }

    #[test]
    fn test_checkbox_value() {
        let blocks = vec![
            Block::key("k")
                .with_relationship(Relationship::value(["v"]))
                .with_children(["w"]),
            Block::value("v").with_children(["s"]),
            Block::word("w", "Married"),
            Block::selection("s", SelectionStatus::Selected),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        let forms = reconstruct_forms(&index).unwrap();
        assert_eq!(forms["Married "], "X ");
    }

    #[test]
    fn test_key_without_value() {
        let blocks = vec![Block::key("k")];
        let index = BlockIndex::build(&blocks).unwrap();
        assert!(reconstruct_forms(&index).unwrap_err().is_malformed());
    }

    #[test]
    fn test_value_not_in_value_map() {
        let blocks = vec![
            Block::key("k").with_relationship(Relationship::value(["w"])),
            Block::word("w", "oops"),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        assert!(reconstruct_forms(&index).unwrap_err().is_malformed());
    }

    #[test]
    fn test_last_value_id_wins() {
        let blocks = vec![
            Block::key("k")
                .with_relationship(Relationship::value(["v1", "v2"]))
                .with_children(["w"]),
            Block::value("v1").with_children(["a"]),
            Block::value("v2").with_children(["b"]),
            Block::word("w", "Key"),
            Block::word("a", "one"),
            Block::word("b", "two"),
        ];
        let index = BlockIndex::build(&blocks).unwrap();
        let forms = reconstruct_forms(&index).unwrap();
        assert_eq!(forms["Key "], "two ");
    }
}
