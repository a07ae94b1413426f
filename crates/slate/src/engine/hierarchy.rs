//! Input validation and parent/child type rules.
//!
//! Everything here is pure; the engine calls these checks before touching
//! the document so a rejected request never causes a write.

use super::EngineError;
use crate::domain::{IssueKey, IssueType, ParentRule};

/// Trimmed title, or `MissingTitle` when absent or blank.
pub(crate) fn validate_title(title: Option<&str>) -> Result<String, EngineError> {
    match title.map(str::trim) {
        Some(title) if !title.is_empty() => Ok(title.to_string()),
        _ => Err(EngineError::MissingTitle),
    }
}

/// Resolve an optional type name; absent or blank means Task.
pub(crate) fn resolve_issue_type(name: Option<&str>) -> Result<IssueType, EngineError> {
    match name {
        None => Ok(IssueType::Task),
        Some(name) if name.trim().is_empty() => Ok(IssueType::Task),
        Some(name) => {
            IssueType::from_alias(name).ok_or_else(|| EngineError::InvalidIssueType {
                name: name.to_string(),
            })
        }
    }
}

/// Normalize a supplied parent key; blank counts as no parent.
pub(crate) fn normalize_parent_key(parent_key: Option<&str>) -> Option<IssueKey> {
    parent_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(IssueKey::from)
}

/// Check that an issue of `issue_type` may sit under `parent`.
///
/// `parent` is the supplied key together with the type of the issue it
/// resolved to; existence has already been checked.
pub(crate) fn check_parent(
    issue_type: IssueType,
    parent: Option<(&IssueKey, IssueType)>,
) -> Result<(), EngineError> {
    match (issue_type.parent_rule(), parent) {
        (ParentRule::Required(_), None) => Err(EngineError::InvalidParentKey { issue_type }),
        (ParentRule::Forbidden, Some((parent_key, _))) => Err(EngineError::ParentNotAllowed {
            issue_type,
            parent_key: parent_key.clone(),
        }),
        (
            ParentRule::Optional(allowed) | ParentRule::Required(allowed),
            Some((parent_key, parent_type)),
        ) if !allowed.contains(&parent_type) => Err(EngineError::InvalidParentType {
            issue_type,
            parent_key: parent_key.clone(),
            parent_type,
        }),
        _ => Ok(()),
    }
}
