//! Repository layout and configuration for slate.
//!
//! A slate repository is any directory containing `.slate/config.yaml`:
//!
//! ```yaml
//! storage:
//!   backend: json
//!   data-file: .slate/issues.json
//! ```
//!
//! Relative data file paths are resolved against the repository root. The
//! `SLATE_DATA_FILE` environment variable, when set, replaces the configured
//! path for the JSON backend.

use crate::error::{Error, Result};
use crate::storage::StorageBackend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the slate directory
pub const SLATE_DIR_NAME: &str = ".slate";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the issue document file
pub const DOCUMENT_FILE_NAME: &str = "issues.json";

/// Environment variable overriding the document path
pub const DATA_FILE_ENV: &str = "SLATE_DATA_FILE";

/// Maximum directory depth to traverse when searching for the slate root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for slate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlateConfig {
    /// Storage configuration
    pub storage: StorageConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Which backend holds the document
    pub backend: BackendKind,

    /// Path to the document file, relative to the repository root
    pub data_file: String,
}

/// Storage backend named in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Single JSON document on disk
    Json,

    /// In-memory only; nothing survives the process
    Memory,
}

impl SlateConfig {
    /// Create a configuration using the JSON backend at `data_file`.
    pub fn new(data_file: impl Into<String>) -> Self {
        Self {
            storage: StorageConfig {
                backend: BackendKind::Json,
                data_file: data_file.into(),
            },
        }
    }

    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl Default for SlateConfig {
    fn default() -> Self {
        Self::new(format!("{SLATE_DIR_NAME}/{DOCUMENT_FILE_NAME}"))
    }
}

impl StorageConfig {
    /// Resolve the configured backend relative to `root`.
    ///
    /// Honors the `SLATE_DATA_FILE` environment variable.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the JSON backend has no data file.
    pub fn to_backend(&self, root: &Path) -> Result<StorageBackend> {
        let data_file_override = std::env::var(DATA_FILE_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        self.to_backend_with(root, data_file_override.as_deref())
    }

    /// Resolve the backend with an explicit data file override.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the JSON backend has no data file.
    pub fn to_backend_with(
        &self,
        root: &Path,
        data_file_override: Option<&str>,
    ) -> Result<StorageBackend> {
        match self.backend {
            BackendKind::Memory => Ok(StorageBackend::InMemory),
            BackendKind::Json => {
                let data_file = data_file_override.unwrap_or(&self.data_file).trim();
                if data_file.is_empty() {
                    return Err(Error::Config(
                        "storage.data-file must not be empty for the json backend".to_string(),
                    ));
                }
                Ok(StorageBackend::Json(resolve_path(root, data_file)))
            }
        }
    }
}

fn resolve_path(root: &Path, data_file: &str) -> PathBuf {
    let path = Path::new(data_file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Find the slate root directory by searching up the directory tree.
///
/// Returns the nearest directory (starting at `start_dir`) that contains
/// `.slate/`, or `None` when the filesystem root or the depth limit is
/// reached first.
pub fn find_slate_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(SLATE_DIR_NAME).is_dir() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
