//! Error types for slate-doc operations.

use std::io;
use thiserror::Error;

/// The error type for slate-doc operations.
///
/// Unusable document *content* is never an error; see [`crate::Warning`].
/// These variants cover failures the caller has to deal with.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The target path cannot hold a document (for example it has no file name).
    #[error("Invalid document path: {0}")]
    InvalidPath(String),
}

/// A specialized Result type for slate-doc operations.
pub type Result<T> = std::result::Result<T, Error>;
