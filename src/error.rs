//! Error types for blockdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for blockdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing or exporting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON or does not have the block schema shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The block graph violates a structural invariant.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Reconstruction was requested before any response was available.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Table index is out of range.
    #[error("Table {0} is out of range (document has {1} tables)")]
    TableOutOfRange(usize, usize),

    /// Error while writing an export destination.
    #[error("Export error: {0}")]
    Export(String),

    /// Unknown or unsupported backend/action combination.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Coarse error classes callers can match on without caring about details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Contract violation by the acquisition layer
    MalformedInput,
    /// Caller invoked reconstruction too early
    Precondition,
    /// Export index or destination problem
    Export,
    /// Underlying I/O failure
    Io,
    /// Unknown backend or action
    Unsupported,
}

impl Error {
    /// Shorthand for a [`Error::MalformedInput`] error.
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }

    /// Classify this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Io(_) => ErrorClass::Io,
            Error::Json(e) if e.is_io() => ErrorClass::Io,
            Error::Json(_) | Error::MalformedInput(_) => ErrorClass::MalformedInput,
            Error::Precondition(_) => ErrorClass::Precondition,
            Error::TableOutOfRange(..) | Error::Export(_) => ErrorClass::Export,
            Error::Unsupported(_) => ErrorClass::Unsupported,
        }
    }

    /// Whether the input graph (or its JSON encoding) was malformed.
    pub fn is_malformed(&self) -> bool {
        self.class() == ErrorClass::MalformedInput
    }
}
