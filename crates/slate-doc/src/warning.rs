//! Warning types describing why a stored document could not be used.
//!
//! Reading a document never fails because of its *content*. Instead the
//! reader reports one [`Warning`] and lets the caller decide how to recover
//! (typically by starting over from a default document).
//!
//! # Examples
//!
//! ```
//! use slate_doc::Warning;
//!
//! let warning = Warning::MalformedJson {
//!     line: 3,
//!     column: 14,
//!     error: "expected `,` or `}`".to_string(),
//! };
//!
//! assert_eq!(warning.kind(), "malformed_json");
//! assert!(warning.description().contains("line 3"));
//! ```

use std::fmt;

/// The reason a stored document was unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The document file does not exist.
    Missing,

    /// The document file exists but is empty or whitespace only.
    Empty,

    /// The content is not syntactically valid JSON.
    ///
    /// Common causes: manual editing errors, truncated writes from tools
    /// that do not write atomically.
    MalformedJson {
        /// The 1-based line where parsing stopped.
        line: usize,
        /// The 1-based column where parsing stopped.
        column: usize,
        /// A description of the parse error.
        error: String,
    },

    /// The content is valid JSON but does not have the expected shape.
    ///
    /// Common causes: a field with the wrong type, a missing required field,
    /// an unknown enum tag.
    SchemaMismatch {
        /// The 1-based line of the offending value.
        line: usize,
        /// The 1-based column of the offending value.
        column: usize,
        /// A description of the mismatch.
        error: String,
    },
}

impl Warning {
    /// Returns a static string identifying the warning kind.
    ///
    /// Useful for structured logging and programmatic filtering without
    /// matching on the variants.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Empty => "empty",
            Self::MalformedJson { .. } => "malformed_json",
            Self::SchemaMismatch { .. } => "schema_mismatch",
        }
    }

    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Missing => "document does not exist".to_string(),
            Self::Empty => "document is empty".to_string(),
            Self::MalformedJson {
                line,
                column,
                error,
            } => format!("line {line}, column {column}: malformed JSON: {error}"),
            Self::SchemaMismatch {
                line,
                column,
                error,
            } => format!("line {line}, column {column}: unexpected document shape: {error}"),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
