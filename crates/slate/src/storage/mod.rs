//! Storage abstraction layer for slate.
//!
//! All state lives in one [`Document`] that is loaded and saved as a whole.
//! Two backends implement [`DocumentStore`]:
//!
//! - **JSON file** ([`JsonFileStore`]): durable, one pretty-printed JSON
//!   file replaced atomically on every save
//! - **In-memory** ([`MemoryStore`]): ephemeral, useful for tests and
//!   throwaway sessions
//!
//! # Recovery
//!
//! `load` never fails because of what is stored. A missing, empty,
//! malformed or wrongly-shaped document is replaced by
//! [`Document::default()`], which is written back so the location is
//! well-formed for the next read. Other I/O failures (permissions, the
//! path being a directory) are returned to the caller.
//!
//! Reads that must not write ([`DocumentStore::read`]) recover in memory
//! only. Writers hold [`DocumentStore::lock`] for their whole load, mutate,
//! save cycle; for JSON files this is an advisory lock file, so separate
//! processes are serialized too.
//!
//! # Example
//!
//! ```no_run
//! use slate::storage::{create_store, StorageBackend};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let store = create_store(StorageBackend::Json(".slate/issues.json".into()));
//!     let document = store.load().await?;
//!     println!("{} issues", document.issues.len());
//!     Ok(())
//! }
//! ```

mod json_file;
mod lock;
mod memory;

pub use json_file::{JsonFileStore, LoadWarning, load_document, save_document};
pub use lock::{DocumentLock, LOCK_TIMEOUT, lock_path};
pub use memory::MemoryStore;

use crate::domain::Document;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Whole-document persistence.
///
/// Implementations must be `Send + Sync`; the engine shares one store
/// between concurrent callers. Within a process the engine serializes
/// writers itself; `lock` extends that to other processes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the persisted document, recovering to the default when the
    /// stored content is unusable.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than missing or unusable
    /// content, and if writing the recovered default fails.
    async fn load(&self) -> Result<Document>;

    /// Replace the persisted document with `document`.
    ///
    /// Either the whole document is stored or the previous one is left in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or I/O fails.
    async fn save(&self, document: &Document) -> Result<()>;

    /// Read the persisted document without writing anything.
    ///
    /// Unusable content reads as the default document but is left on disk
    /// for the next writer to replace.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than missing or unusable
    /// content.
    async fn read(&self) -> Result<Document> {
        self.load().await
    }

    /// Take the store's writer lock, held until the guard drops.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be acquired.
    async fn lock(&self) -> Result<DocumentLock> {
        Ok(DocumentLock::unlocked())
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-memory storage (ephemeral)
    InMemory,

    /// JSON document file (persistent)
    Json(PathBuf),
}

impl StorageBackend {
    /// Returns the data file path for file-based backends.
    pub fn data_path(&self) -> Option<&Path> {
        match self {
            StorageBackend::Json(path) => Some(path),
            StorageBackend::InMemory => None,
        }
    }
}

/// Create a store for the given backend.
pub fn create_store(backend: StorageBackend) -> Arc<dyn DocumentStore> {
    match backend {
        StorageBackend::InMemory => Arc::new(MemoryStore::new()),
        StorageBackend::Json(path) => Arc::new(JsonFileStore::new(path)),
    }
}
