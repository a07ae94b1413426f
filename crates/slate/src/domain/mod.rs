//! Domain types for issue tracking.
//!
//! This module contains the core domain types for the slate issue tracker:
//! the [`Issue`] sum type, the [`Document`] holding every issue, and the
//! small value types they are built from.

mod document;
mod issue;

pub use document::Document;
pub use issue::{ContainerIssue, Issue, IssueFields};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable, globally unique issue key (e.g. `EPIC-3`).
///
/// Keys are lookup references, not ownership: a child points at its parent
/// by key and a container lists its children by key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueKey(String);

impl IssueKey {
    /// Create a new issue key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IssueKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IssueKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    /// Not started
    #[serde(rename = "Todo")]
    Todo,

    /// Being worked on
    #[serde(rename = "In Progress")]
    InProgress,

    /// Completed
    #[serde(rename = "Done")]
    Done,
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueStatus::Todo => "Todo",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Done => "Done",
        };
        f.write_str(s)
    }
}

/// Type of issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    /// General unit of work
    Task,

    /// User-facing feature
    Story,

    /// Defect
    Bug,

    /// Large body of work grouping tasks and stories
    Epic,

    /// Piece of an epic or story
    Subtask,
}

/// Which parents an issue type accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRule {
    /// The issue must not have a parent.
    Forbidden,

    /// A parent is optional; when present it must be one of these types.
    Optional(&'static [IssueType]),

    /// A parent is mandatory and must be one of these types.
    Required(&'static [IssueType]),
}

impl IssueType {
    /// Every issue type, in declaration order.
    pub const ALL: [IssueType; 5] = [
        IssueType::Task,
        IssueType::Story,
        IssueType::Bug,
        IssueType::Epic,
        IssueType::Subtask,
    ];

    /// Resolve a user-supplied type name.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// `feature` is accepted as an alias for [`IssueType::Story`].
    pub fn from_alias(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "task" => Some(IssueType::Task),
            "story" | "feature" => Some(IssueType::Story),
            "epic" => Some(IssueType::Epic),
            "bug" => Some(IssueType::Bug),
            "subtask" => Some(IssueType::Subtask),
            _ => None,
        }
    }

    /// Status a newly created issue of this type starts in.
    pub fn default_status(self) -> IssueStatus {
        match self {
            IssueType::Bug => IssueStatus::InProgress,
            IssueType::Task | IssueType::Story | IssueType::Epic | IssueType::Subtask => {
                IssueStatus::Todo
            }
        }
    }

    /// Parent/child compatibility for this type.
    pub fn parent_rule(self) -> ParentRule {
        match self {
            IssueType::Task | IssueType::Story => ParentRule::Optional(&[IssueType::Epic]),
            IssueType::Subtask => ParentRule::Required(&[IssueType::Epic, IssueType::Story]),
            IssueType::Bug | IssueType::Epic => ParentRule::Forbidden,
        }
    }

    /// Whether issues of this type track their children in `childIssueKeys`.
    pub fn is_container(self) -> bool {
        matches!(self, IssueType::Epic | IssueType::Story)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueType::Task => "Task",
            IssueType::Story => "Story",
            IssueType::Bug => "Bug",
            IssueType::Epic => "Epic",
            IssueType::Subtask => "Subtask",
        };
        f.write_str(s)
    }
}

/// Data for creating a new issue.
///
/// Every field is optional at this level; [`crate::engine::IssueEngine`]
/// applies defaults and rejects what it cannot accept.
#[derive(Debug, Clone, Default)]
pub struct CreateIssueInput {
    /// Issue title, stored trimmed as the summary (required)
    pub title: Option<String>,

    /// Longer description (defaults to empty)
    pub description: Option<String>,

    /// Issue type name or alias (defaults to task)
    pub issue_type_name: Option<String>,

    /// Key of the parent issue
    pub parent_key: Option<String>,
}

impl CreateIssueInput {
    /// Start an input with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the issue type name.
    #[must_use]
    pub fn with_type(mut self, issue_type_name: impl Into<String>) -> Self {
        self.issue_type_name = Some(issue_type_name.into());
        self
    }

    /// Set the parent key.
    #[must_use]
    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.parent_key = Some(parent_key.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::task("task", IssueType::Task)]
    #[case::story("story", IssueType::Story)]
    #[case::feature_alias("feature", IssueType::Story)]
    #[case::epic("epic", IssueType::Epic)]
    #[case::bug("bug", IssueType::Bug)]
    #[case::subtask("subtask", IssueType::Subtask)]
    #[case::uppercase("EPIC", IssueType::Epic)]
    #[case::mixed_case_padded("  SubTask ", IssueType::Subtask)]
    fn from_alias_resolves(#[case] name: &str, #[case] expected: IssueType) {
        assert_eq!(IssueType::from_alias(name), Some(expected));
    }

    #[rstest]
    #[case::unknown("chore")]
    #[case::empty("")]
    #[case::plural("tasks")]
    #[case::hyphenated("sub-task")]
    fn from_alias_rejects(#[case] name: &str) {
        assert_eq!(IssueType::from_alias(name), None);
    }

    #[test]
    fn only_bug_starts_in_progress() {
        for issue_type in IssueType::ALL {
            let expected = if issue_type == IssueType::Bug {
                IssueStatus::InProgress
            } else {
                IssueStatus::Todo
            };
            assert_eq!(issue_type.default_status(), expected, "{issue_type}");
        }
    }

    #[test]
    fn containers_are_epic_and_story() {
        let containers: Vec<_> = IssueType::ALL
            .into_iter()
            .filter(|t| t.is_container())
            .collect();
        assert_eq!(containers, vec![IssueType::Story, IssueType::Epic]);
    }

    #[test]
    fn status_serializes_with_display_names() {
        assert_eq!(
            serde_json::to_string(&IssueStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(serde_json::to_string(&IssueStatus::Todo).unwrap(), "\"Todo\"");
        let parsed: IssueStatus = serde_json::from_str("\"Done\"").unwrap();
        assert_eq!(parsed, IssueStatus::Done);
    }

    #[test]
    fn issue_key_is_a_bare_string_in_json() {
        let key = IssueKey::new("EPIC-4");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"EPIC-4\"");
        assert_eq!(key.to_string(), "EPIC-4");
    }
}
