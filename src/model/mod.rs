//! Document model types.
//!
//! Two halves: the block schema the analysis engine emits ([`Block`],
//! [`RawResponse`]) and the normalized, page-indexed output ([`Document`]).

mod block;
mod document;
mod page;
mod response;
mod table;

pub use block::{Block, BlockType, EntityType, Relationship, RelationshipType, SelectionStatus};
pub use document::{Document, Forms, Metadata};
pub use page::Page;
pub use response::{DocumentMetadata, RawResponse, ResponseKind};
pub use table::{Table, TableRow};
