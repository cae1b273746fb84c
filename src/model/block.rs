//! Block-level input types.
//!
//! These mirror the block schema emitted by the document-analysis engine.
//! Field names follow the engine's PascalCase JSON; unknown fields such as
//! `Geometry` are ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a string-tagged enum whose unrecognized tags are preserved in an
/// `Other` variant instead of failing deserialization.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Any tag not listed above
            Other(String),
        }

        impl $name {
            /// The wire tag of this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $tag, )+
                    $name::Other(tag) => tag.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                match tag.as_str() {
                    $( $tag => $name::$variant, )+
                    _ => $name::Other(tag),
                }
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                $name::from(tag.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(tag) => tag,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum! {
    /// Structural type of a block.
    pub enum BlockType {
        /// Page boundary marker
        Page => "PAGE",
        /// Line of text
        Line => "LINE",
        /// Single word
        Word => "WORD",
        /// Table container
        Table => "TABLE",
        /// Table cell
        Cell => "CELL",
        /// Merged table cell spanning several cells
        MergedCell => "MERGED_CELL",
        /// Form key or value element
        KeyValueSet => "KEY_VALUE_SET",
        /// Checkbox or radio button
        SelectionElement => "SELECTION_ELEMENT",
        Title => "TITLE",
        Query => "QUERY",
        QueryResult => "QUERY_RESULT",
        Signature => "SIGNATURE",
        TableTitle => "TABLE_TITLE",
        TableFooter => "TABLE_FOOTER",
    }
}

tag_enum! {
    /// Label of a relationship between blocks.
    pub enum RelationshipType {
        /// Composition (page → line → word, table → cell → word)
        Child => "CHILD",
        /// Key → value pairing
        Value => "VALUE",
        ComplexFeatures => "COMPLEX_FEATURES",
        MergedCell => "MERGED_CELL",
        Title => "TITLE",
        Answer => "ANSWER",
        Table => "TABLE",
        TableTitle => "TABLE_TITLE",
        TableFooter => "TABLE_FOOTER",
    }
}

tag_enum! {
    /// Entity label attached to a block.
    pub enum EntityType {
        /// Form key
        Key => "KEY",
        /// Form value
        Value => "VALUE",
        ColumnHeader => "COLUMN_HEADER",
        TableTitle => "TABLE_TITLE",
        TableFooter => "TABLE_FOOTER",
        TableSectionTitle => "TABLE_SECTION_TITLE",
        TableSummary => "TABLE_SUMMARY",
        StructuredTable => "STRUCTURED_TABLE",
        SemiStructuredTable => "SEMI_STRUCTURED_TABLE",
    }
}

/// Selection status of a [`BlockType::SelectionElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    Selected,
    NotSelected,
}

/// A typed, ordered link from one block to others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    /// Relationship label
    #[serde(rename = "Type")]
    pub kind: RelationshipType,

    /// Referenced block ids, in reading order
    #[serde(default)]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a relationship.
    pub fn new<S: Into<String>>(
        kind: RelationshipType,
        ids: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a `CHILD` relationship.
    pub fn child<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(RelationshipType::Child, ids)
    }

    /// Create a `VALUE` relationship.
    pub fn value<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(RelationshipType::Value, ids)
    }
}

/// One structural unit reported by the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Identifier, unique within one response
    pub id: String,

    /// Block type; absent tags leave the block out of every pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<BlockType>,

    /// Recognized text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Page number (1-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<EntityType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,

    /// Row of a table cell (1-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// Column of a table cell (1-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<SelectionStatus>,

    /// Engine confidence (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Block {
    /// Create a block with an id and type and nothing else.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type: Some(block_type),
            text: None,
            page: None,
            entity_types: Vec::new(),
            relationships: Vec::new(),
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
            selection_status: None,
            confidence: None,
        }
    }

    /// Create a `PAGE` block.
    pub fn page(id: impl Into<String>, number: u32) -> Self {
        Self::new(id, BlockType::Page).on_page(number)
    }

    /// Create a `WORD` block.
    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Word).with_text(text)
    }

    /// Create a `LINE` block.
    pub fn line(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Line).with_text(text)
    }

    /// Create a `CELL` block at the given 1-based position.
    pub fn cell(id: impl Into<String>, row: u32, column: u32) -> Self {
        let mut block = Self::new(id, BlockType::Cell);
        block.row_index = Some(row);
        block.column_index = Some(column);
        block
    }

    /// Create a `SELECTION_ELEMENT` block.
    pub fn selection(id: impl Into<String>, status: SelectionStatus) -> Self {
        let mut block = Self::new(id, BlockType::SelectionElement);
        block.selection_status = Some(status);
        block
    }

    /// Create a `KEY_VALUE_SET` block labeled as a key.
    pub fn key(id: impl Into<String>) -> Self {
        let mut block = Self::new(id, BlockType::KeyValueSet);
        block.entity_types.push(EntityType::Key);
        block
    }

    /// Create a `KEY_VALUE_SET` block labeled as a value.
    pub fn value(id: impl Into<String>) -> Self {
        let mut block = Self::new(id, BlockType::KeyValueSet);
        block.entity_types.push(EntityType::Value);
        block
    }

    /// Set text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set page number and return self.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Add a relationship and return self.
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Add a `CHILD` relationship and return self.
    pub fn with_children<S: Into<String>>(self, ids: impl IntoIterator<Item = S>) -> Self {
        self.with_relationship(Relationship::child(ids))
    }

    /// Check the block type.
    pub fn is(&self, block_type: &BlockType) -> bool {
        self.block_type.as_ref() == Some(block_type)
    }

    /// Whether this is a `KEY_VALUE_SET` block labeled `KEY`.
    pub fn is_key(&self) -> bool {
        self.is(&BlockType::KeyValueSet) && self.entity_types.contains(&EntityType::Key)
    }

    /// Whether this is a `SELECTION_ELEMENT` that is checked.
    pub fn is_selected(&self) -> bool {
        self.is(&BlockType::SelectionElement)
            && self.selection_status == Some(SelectionStatus::Selected)
    }

    /// Iterate over referenced ids of all relationships with the given label.
    pub fn related_ids<'a>(
        &'a self,
        kind: &'a RelationshipType,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.relationships
            .iter()
            .filter(move |r| &r.kind == kind)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }
}
