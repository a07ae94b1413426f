//! Whole-document JSON persistence for Rust.
//!
//! A document is a single JSON value stored in a single file. This library
//! reads such files without failing on unusable content (missing, empty,
//! malformed or wrongly-shaped files are reported as a [`Warning`]) and
//! writes them atomically so readers never observe a partial document.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod warning;

pub use atomic::write_json_atomic;
pub use error::{Error, Result};
pub use reader::{ReadOutcome, parse_document, read_json_resilient};
pub use warning::Warning;
