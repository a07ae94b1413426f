//! Sequential, type-prefixed issue keys.
//!
//! Keys have the form `{prefix}-{sequence}` where the prefix is fixed per
//! issue type and the sequence comes from the document's single global
//! counter (see [`crate::domain::Document::allocate_key`]):
//!
//! | Type    | Prefix |
//! |---------|--------|
//! | Task    | `TASK` |
//! | Story   | `STOR` |
//! | Bug     | `BUG`  |
//! | Epic    | `EPIC` |
//! | Subtask | `SUBT` |
//!
//! # Example
//!
//! ```
//! use slate::domain::IssueType;
//! use slate::key_generation::{generate_key, parse_key};
//!
//! let key = generate_key(7, IssueType::Story);
//! assert_eq!(key.as_str(), "STOR-7");
//! assert_eq!(parse_key(key.as_str()), Some((IssueType::Story, 7)));
//! ```

use crate::domain::{IssueKey, IssueType};

/// The fixed key prefix for an issue type.
pub fn key_prefix(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Task => "TASK",
        IssueType::Story => "STOR",
        IssueType::Bug => "BUG",
        IssueType::Epic => "EPIC",
        IssueType::Subtask => "SUBT",
    }
}

/// Build the key for sequence number `counter` and `issue_type`.
pub fn generate_key(counter: u64, issue_type: IssueType) -> IssueKey {
    IssueKey::new(format!("{}-{}", key_prefix(issue_type), counter))
}

/// Split a key back into its type and sequence number.
///
/// Returns `None` unless the key is exactly what [`generate_key`] would
/// produce: a known prefix, one hyphen, and a decimal number without sign
/// or leading zeros.
pub fn parse_key(key: &str) -> Option<(IssueType, u64)> {
    let (prefix, sequence) = key.split_once('-')?;
    let issue_type = IssueType::ALL
        .into_iter()
        .find(|t| key_prefix(*t) == prefix)?;

    if sequence.is_empty() || !sequence.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if sequence.len() > 1 && sequence.starts_with('0') {
        return None;
    }

    let number = sequence.parse().ok()?;
    Some((issue_type, number))
}

/// Whether `key` is a well-formed issue key.
pub fn validate_key(key: &str) -> bool {
    parse_key(key).is_some()
}
