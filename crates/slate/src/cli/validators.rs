//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time. Title, type and parent are checked by the
//! engine, which reports them with their error codes.

use crate::key_generation::validate_key;

/// Validate an issue key such as `EPIC-3`.
pub fn validate_issue_key(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Issue key cannot be empty".to_string());
    }

    if !validate_key(s) {
        return Err(format!(
            "Invalid issue key '{s}'. Expected PREFIX-NUMBER with prefix TASK, STOR, BUG, EPIC or SUBT (e.g. EPIC-3)"
        ));
    }

    Ok(s.to_string())
}

/// Validate a description.
///
/// Allows newlines and tabs but rejects other control characters.
pub fn validate_description(s: &str) -> Result<String, String> {
    if let Some(pos) = s.chars().position(|c| {
        let code = c as u32;
        (code < 0x20 && code != 0x09 && code != 0x0A && code != 0x0D)
            || (0x7F..=0x9F).contains(&code)
    }) {
        return Err(format!(
            "Description contains invalid control character at position {pos}"
        ));
    }

    Ok(s.to_string())
}
