//! In-memory document store.
//!
//! Data is held in RAM and lost when the process exits. Loads hand out a
//! clone, so callers always work on their own snapshot and nothing they do
//! is visible until they `save`.

use super::DocumentStore;
use crate::domain::Document;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Ephemeral [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Document>,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `document`.
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Mutex::new(document),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed saves since creation.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// A copy of the stored document.
    pub async fn snapshot(&self) -> Document {
        self.document.lock().await.clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Document> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, document: &Document) -> Result<()> {
        *self.document.lock().await = document.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
