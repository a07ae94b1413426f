//! Issue creation and lookup on top of a [`DocumentStore`].
//!
//! The engine is the only writer of the document. Every mutation runs as
//! one load, mutate, save cycle under an exclusive lock, so two concurrent
//! `create_issue` calls never observe the same counter value and a failed
//! request leaves the stored document exactly as it was. The exclusive lock
//! is an in-process `RwLock` plus the store's own lock, which for JSON files
//! also excludes other processes. Reads never write.

mod error;
mod hierarchy;

pub use error::{EngineError, ErrorClass, ErrorKind};

use crate::domain::{CreateIssueInput, Document, Issue, IssueFields};
use crate::error::{Error, Result};
use crate::storage::DocumentStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Creates issues and keeps the parent/child hierarchy consistent.
pub struct IssueEngine {
    store: Arc<dyn DocumentStore>,
    lock: RwLock<()>,
}

impl IssueEngine {
    /// Create an engine over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            lock: RwLock::new(()),
        }
    }

    /// Run `mutate` against the current document as one atomic step.
    ///
    /// The closure returns its result plus whether it changed the document.
    /// The document is saved only when it did. An error from the closure
    /// discards its changes; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a store error converted into `E`.
    pub async fn transact<T, E, F>(&self, mutate: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Document) -> std::result::Result<(T, bool), E>,
        E: From<Error>,
    {
        let _guard = self.lock.write().await;
        let _store_lock = self.store.lock().await?;
        let mut document = self.store.load().await?;
        let (value, changed) = mutate(&mut document)?;
        if changed {
            self.store.save(&document).await?;
        }
        Ok(value)
    }

    /// Validate `input`, assign a key and persist a new issue.
    ///
    /// The title is trimmed and stored as the summary. A missing type means
    /// Task. When a parent is given it must exist and accept the new type;
    /// container parents (Epic, Story) record the new key as a child.
    ///
    /// # Errors
    ///
    /// Returns a validation or not-found [`EngineError`] when the input is
    /// rejected, and [`EngineError::Internal`] when storage fails. In every
    /// error case the stored document is unchanged.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use slate::domain::CreateIssueInput;
    /// # use slate::engine::IssueEngine;
    /// # use slate::storage::{create_store, StorageBackend};
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> anyhow::Result<()> {
    /// let engine = IssueEngine::new(create_store(StorageBackend::InMemory));
    /// let epic = engine
    ///     .create_issue(CreateIssueInput::titled("Checkout").with_type("epic"))
    ///     .await?;
    /// let story = engine
    ///     .create_issue(
    ///         CreateIssueInput::titled("Pay by card")
    ///             .with_type("story")
    ///             .with_parent(epic.key().as_str()),
    ///     )
    ///     .await?;
    /// assert_eq!(story.key().as_str(), "STOR-1");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_issue(
        &self,
        input: CreateIssueInput,
    ) -> std::result::Result<Issue, EngineError> {
        let summary = hierarchy::validate_title(input.title.as_deref())?;
        let issue_type = hierarchy::resolve_issue_type(input.issue_type_name.as_deref())?;
        let parent_key = hierarchy::normalize_parent_key(input.parent_key.as_deref());
        let description = input.description.unwrap_or_default();

        debug!(%issue_type, parent = ?parent_key, "Creating issue");

        let issue = self
            .transact(|document| -> std::result::Result<(Issue, bool), EngineError> {
                let parent_type = match &parent_key {
                    Some(key) => Some(
                        document
                            .find(key)
                            .map(Issue::issue_type)
                            .ok_or_else(|| EngineError::ParentIssueNotFound { key: key.clone() })?,
                    ),
                    None => None,
                };
                hierarchy::check_parent(issue_type, parent_key.as_ref().zip(parent_type))?;

                let key = document.allocate_key(issue_type)?;
                let now = Utc::now();
                let issue = Issue::new(
                    issue_type,
                    IssueFields {
                        id: Uuid::new_v4(),
                        key,
                        summary,
                        description,
                        status: issue_type.default_status(),
                        created_at: now,
                        updated_at: now,
                        parent_key: parent_key.clone(),
                    },
                );
                document.issues.push(issue.clone());

                if let Some(parent_key) = &parent_key
                    && let Some(parent) = document.find_mut(parent_key)
                    && parent.attach_child(issue.key().clone(), now)
                {
                    debug!(parent = %parent_key, child = %issue.key(), "Attached child");
                }

                Ok((issue, true))
            })
            .await?;

        info!(
            key = %issue.key(),
            %issue_type,
            parent = ?issue.parent_key().map(ToString::to_string),
            "Created issue"
        );
        Ok(issue)
    }

    /// Look up an issue by key.
    ///
    /// Surrounding whitespace in `key` is ignored. Returns `Ok(None)` when no
    /// issue has the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    pub async fn get_issue_by_key(&self, key: &str) -> Result<Option<Issue>> {
        let _guard = self.lock.read().await;
        let document = self.store.read().await?;
        let key = key.trim();
        Ok(document
            .issues
            .into_iter()
            .find(|issue| issue.key().as_str() == key))
    }
}

impl std::fmt::Debug for IssueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueEngine").finish_non_exhaustive()
    }
}
