//! Application context for CLI command execution.
//!
//! # Example
//!
//! ```no_run
//! use slate::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let issue = app.engine().get_issue_by_key("TASK-0").await?;
//!     println!("{issue:?}");
//!     Ok(())
//! }
//! ```

use crate::config::{CONFIG_FILE_NAME, SLATE_DIR_NAME, SlateConfig, find_slate_root};
use crate::engine::IssueEngine;
use crate::error::{Error, Result};
use crate::storage::{StorageBackend, create_store};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application context for CLI operations.
///
/// Locates the repository, reads its configuration and owns the
/// [`IssueEngine`] built on the configured store.
pub struct App {
    engine: IssueEngine,

    /// Path to the slate directory (.slate)
    slate_dir: PathBuf,

    backend: StorageBackend,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("slate_dir", &self.slate_dir)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for a `.slate/` directory, loads its
    /// configuration and opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No slate repository is found in the directory tree
    /// - Configuration cannot be loaded or is invalid
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_slate_root(working_dir).ok_or(Error::NotInitialized)?;

        let slate_dir = root_dir.join(SLATE_DIR_NAME);
        let config = SlateConfig::load(&slate_dir.join(CONFIG_FILE_NAME)).await?;
        let backend = config.storage.to_backend(&root_dir)?;

        debug!(root = %root_dir.display(), ?backend, "Opened repository");

        Ok(Self {
            engine: IssueEngine::new(create_store(backend.clone())),
            slate_dir,
            backend,
        })
    }

    /// The issue engine.
    pub fn engine(&self) -> &IssueEngine {
        &self.engine
    }

    /// Get the path to the slate directory.
    pub fn slate_dir(&self) -> &Path {
        &self.slate_dir
    }

    /// The storage backend in use.
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }
}
