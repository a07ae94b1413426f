//! The persisted document: every issue plus the key counter.

use super::{Issue, IssueKey, IssueType};
use crate::error::{Error, Result};
use crate::key_generation::generate_key;
use serde::{Deserialize, Serialize};

/// The whole persisted state.
///
/// Read in full and written in full on every operation. Both fields are
/// required in the JSON form; a document missing either is unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// All issues, in insertion order
    pub issues: Vec<Issue>,

    /// Sequence number for the next key, shared by every issue type
    pub issue_key_counter: u64,
}

impl Document {
    /// Find an issue by key.
    pub fn find(&self, key: &IssueKey) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.key() == key)
    }

    /// Find an issue by key for mutation.
    pub fn find_mut(&mut self, key: &IssueKey) -> Option<&mut Issue> {
        self.issues.iter_mut().find(|issue| issue.key() == key)
    }

    /// Produce the key for a new issue of `issue_type` and advance the counter.
    ///
    /// The key uses the counter value observed before the increment.
    ///
    /// # Errors
    ///
    /// Returns `Error::CounterOverflow` if the counter cannot be advanced;
    /// the document is left unchanged.
    pub fn allocate_key(&mut self, issue_type: IssueType) -> Result<IssueKey> {
        let next = self
            .issue_key_counter
            .checked_add(1)
            .ok_or(Error::CounterOverflow)?;
        let key = generate_key(self.issue_key_counter, issue_type);
        self.issue_key_counter = next;
        Ok(key)
    }
}
