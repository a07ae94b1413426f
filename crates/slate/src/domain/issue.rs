//! The issue sum type and its shared fields.

use super::{IssueKey, IssueStatus, IssueType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields every issue carries, whatever its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
    /// Opaque unique identifier
    pub id: Uuid,

    /// Human-readable unique key (e.g. `TASK-12`)
    pub key: IssueKey,

    /// One-line summary (never empty)
    pub summary: String,

    /// Longer description (empty when not provided)
    #[serde(default)]
    pub description: String,

    /// Current status
    pub status: IssueStatus,

    /// Creation timestamp, never changes
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,

    /// Key of the parent issue, serialized as `null` when absent
    pub parent_key: Option<IssueKey>,
}

/// An issue that other issues can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerIssue {
    /// Shared issue fields
    #[serde(flatten)]
    pub fields: IssueFields,

    /// Keys of the issues whose `parentKey` is this issue, in creation order
    #[serde(default)]
    pub child_issue_keys: Vec<IssueKey>,
}

/// An issue, tagged by `issueType` when serialized.
///
/// The JSON form is a flat object: the shared fields, the `issueType` tag
/// and, for containers, `childIssueKeys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issueType")]
pub enum Issue {
    /// A general unit of work
    Task(IssueFields),

    /// A user-facing feature; may hold subtasks
    Story(ContainerIssue),

    /// A defect; never has a parent
    Bug(IssueFields),

    /// A large body of work; holds tasks, stories and subtasks
    Epic(ContainerIssue),

    /// A piece of an epic or story
    Subtask(IssueFields),
}

impl Issue {
    /// Build an issue of the given type around its shared fields.
    ///
    /// Container types start with no children.
    pub fn new(issue_type: IssueType, fields: IssueFields) -> Self {
        match issue_type {
            IssueType::Task => Issue::Task(fields),
            IssueType::Bug => Issue::Bug(fields),
            IssueType::Subtask => Issue::Subtask(fields),
            IssueType::Story => Issue::Story(ContainerIssue {
                fields,
                child_issue_keys: Vec::new(),
            }),
            IssueType::Epic => Issue::Epic(ContainerIssue {
                fields,
                child_issue_keys: Vec::new(),
            }),
        }
    }

    /// The variant as an [`IssueType`].
    pub fn issue_type(&self) -> IssueType {
        match self {
            Issue::Task(_) => IssueType::Task,
            Issue::Story(_) => IssueType::Story,
            Issue::Bug(_) => IssueType::Bug,
            Issue::Epic(_) => IssueType::Epic,
            Issue::Subtask(_) => IssueType::Subtask,
        }
    }

    /// Shared fields.
    pub fn fields(&self) -> &IssueFields {
        match self {
            Issue::Task(fields) | Issue::Bug(fields) | Issue::Subtask(fields) => fields,
            Issue::Story(container) | Issue::Epic(container) => &container.fields,
        }
    }

    /// The issue key.
    pub fn key(&self) -> &IssueKey {
        &self.fields().key
    }

    /// The parent key, if any.
    pub fn parent_key(&self) -> Option<&IssueKey> {
        self.fields().parent_key.as_ref()
    }

    /// Children of a container issue; `None` for types that do not track children.
    pub fn child_issue_keys(&self) -> Option<&[IssueKey]> {
        match self {
            Issue::Story(container) | Issue::Epic(container) => Some(&container.child_issue_keys),
            Issue::Task(_) | Issue::Bug(_) | Issue::Subtask(_) => None,
        }
    }

    /// Record `child` as a child of this issue and bump `updatedAt` to `at`.
    ///
    /// Returns `false` (and changes nothing) when this type does not track
    /// children. A key already present is not added twice.
    pub fn attach_child(&mut self, child: IssueKey, at: DateTime<Utc>) -> bool {
        let container = match self {
            Issue::Story(container) | Issue::Epic(container) => container,
            Issue::Task(_) | Issue::Bug(_) | Issue::Subtask(_) => return false,
        };
        if !container.child_issue_keys.contains(&child) {
            container.child_issue_keys.push(child);
        }
        container.fields.updated_at = at;
        true
    }
}
