//! Error types for slate storage and configuration.
//!
//! Issue-creation failures have their own taxonomy in
//! [`crate::engine::EngineError`]; this type covers everything below it.

use std::io;
use thiserror::Error;

/// The error type for slate storage and configuration operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Another writer held the document lock for too long.
    #[error("Document is locked by another writer: {lock_path} (remove it if no slate process is running)")]
    LockBusy {
        /// Path of the lock file
        lock_path: String,
    },

    /// No `.slate` directory in the working directory or its parents.
    #[error("Not a slate repository (or any of the parent directories). Run 'slate init' first")]
    NotInitialized,

    /// The issue key counter cannot be advanced any further.
    #[error("Issue key counter overflow")]
    CounterOverflow,
}

impl From<slate_doc::Error> for Error {
    fn from(err: slate_doc::Error) -> Self {
        match err {
            slate_doc::Error::Io(e) => Error::Io(e),
            slate_doc::Error::Json(e) => Error::Json(e),
            slate_doc::Error::InvalidPath(path) => {
                Error::Storage(format!("Invalid document path: {path}"))
            }
        }
    }
}

/// A specialized Result type for slate operations.
pub type Result<T> = std::result::Result<T, Error>;
