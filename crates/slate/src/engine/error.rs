//! Error taxonomy for issue creation.
//!
//! Every failure has a stable [`ErrorKind`] code and an [`ErrorClass`]
//! that request layers map to a response status:
//!
//! | Class        | Kinds                                                                                    | Status |
//! |--------------|------------------------------------------------------------------------------------------|--------|
//! | `Validation` | `MISSING_TITLE`, `INVALID_ISSUE_TYPE`, `INVALID_PARENT_KEY`, `INVALID_PARENT_TYPE`, `PARENT_NOT_ALLOWED` | 400 |
//! | `NotFound`   | `PARENT_ISSUE_NOT_FOUND`                                                                 | 404    |
//! | `Internal`   | `INTERNAL_ERROR`                                                                         | 500    |

use crate::domain::{IssueKey, IssueType};
use std::fmt;
use thiserror::Error;

/// Why an issue could not be created.
///
/// Validation and not-found errors are raised before anything is written.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The title is absent or blank.
    #[error("Issue title is required")]
    MissingTitle,

    /// The type name matches no known type or alias.
    #[error("Invalid issue type '{name}'. Valid types: task, story, feature, epic, bug, subtask")]
    InvalidIssueType {
        /// The name as supplied
        name: String,
    },

    /// A type that needs a parent was created without one.
    #[error("A {issue_type} requires a parent issue key")]
    InvalidParentKey {
        /// Type of the issue being created
        issue_type: IssueType,
    },

    /// The parent exists but its type cannot hold this issue.
    #[error("A {issue_type} cannot be a child of {parent_key} ({parent_type})")]
    InvalidParentType {
        /// Type of the issue being created
        issue_type: IssueType,
        /// Key of the rejected parent
        parent_key: IssueKey,
        /// Type of the rejected parent
        parent_type: IssueType,
    },

    /// A type that never has a parent was given one.
    #[error("A {issue_type} cannot have a parent issue (got {parent_key})")]
    ParentNotAllowed {
        /// Type of the issue being created
        issue_type: IssueType,
        /// Key that was supplied
        parent_key: IssueKey,
    },

    /// No issue has the supplied parent key.
    #[error("Parent issue not found: {key}")]
    ParentIssueNotFound {
        /// Key that was looked up
        key: IssueKey,
    },

    /// Storage or serialization failed.
    #[error("Internal error: {0}")]
    Internal(#[from] crate::error::Error),
}

/// Stable identifier for each [`EngineError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `MISSING_TITLE`
    MissingTitle,
    /// `INVALID_ISSUE_TYPE`
    InvalidIssueType,
    /// `INVALID_PARENT_KEY`
    InvalidParentKey,
    /// `INVALID_PARENT_TYPE`
    InvalidParentType,
    /// `PARENT_NOT_ALLOWED`
    ParentNotAllowed,
    /// `PARENT_ISSUE_NOT_FOUND`
    ParentIssueNotFound,
    /// `INTERNAL_ERROR`
    Internal,
}

/// Broad outcome category of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The request itself is wrong.
    Validation,
    /// The request refers to something that does not exist.
    NotFound,
    /// The system failed.
    Internal,
}

impl EngineError {
    /// The stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::MissingTitle => ErrorKind::MissingTitle,
            EngineError::InvalidIssueType { .. } => ErrorKind::InvalidIssueType,
            EngineError::InvalidParentKey { .. } => ErrorKind::InvalidParentKey,
            EngineError::InvalidParentType { .. } => ErrorKind::InvalidParentType,
            EngineError::ParentNotAllowed { .. } => ErrorKind::ParentNotAllowed,
            EngineError::ParentIssueNotFound { .. } => ErrorKind::ParentIssueNotFound,
            EngineError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The outcome category of this error.
    pub fn class(&self) -> ErrorClass {
        self.kind().class()
    }
}

impl ErrorKind {
    /// Upper-snake-case code, e.g. `MISSING_TITLE`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::MissingTitle => "MISSING_TITLE",
            ErrorKind::InvalidIssueType => "INVALID_ISSUE_TYPE",
            ErrorKind::InvalidParentKey => "INVALID_PARENT_KEY",
            ErrorKind::InvalidParentType => "INVALID_PARENT_TYPE",
            ErrorKind::ParentNotAllowed => "PARENT_NOT_ALLOWED",
            ErrorKind::ParentIssueNotFound => "PARENT_ISSUE_NOT_FOUND",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// The outcome category for this kind.
    pub fn class(self) -> ErrorClass {
        match self {
            ErrorKind::MissingTitle
            | ErrorKind::InvalidIssueType
            | ErrorKind::InvalidParentKey
            | ErrorKind::InvalidParentType
            | ErrorKind::ParentNotAllowed => ErrorClass::Validation,
            ErrorKind::ParentIssueNotFound => ErrorClass::NotFound,
            ErrorKind::Internal => ErrorClass::Internal,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl ErrorClass {
    /// HTTP-equivalent status code.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorClass::Validation => 400,
            ErrorClass::NotFound => 404,
            ErrorClass::Internal => 500,
        }
    }
}
