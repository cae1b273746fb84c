//! Rendering module for converting documents to output formats.

mod frame;
mod json;
mod options;
mod text;
mod xlsx;

pub use frame::TableFrame;
pub use json::{to_json, JsonFormat};
pub use options::{PageSelection, RenderOptions, DEFAULT_PAGE_SEPARATOR};
pub use text::to_text;
pub use xlsx::write_xlsx;
