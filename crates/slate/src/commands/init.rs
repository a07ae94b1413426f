//! Implementation of the `init` command.
//!
//! Creates the `.slate/` directory with a configuration file and an empty
//! issue document.

use crate::config::{CONFIG_FILE_NAME, DOCUMENT_FILE_NAME, SLATE_DIR_NAME, SlateConfig};
use crate::domain::Document;
use crate::error::{Error, Result};
use crate::storage::save_document;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created slate directory
    pub slate_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created issue document
    pub document_file: PathBuf,
}

/// Initialize a new slate repository in `base_dir`.
///
/// `data_file` overrides where the issue document lives; relative paths
/// are resolved against `base_dir`. The default is `.slate/issues.json`.
///
/// # Errors
///
/// Returns an error if:
/// - `.slate/` already exists in `base_dir`
/// - `data_file` is blank
/// - File system operations fail
pub async fn init(base_dir: &Path, data_file: Option<&str>) -> Result<InitResult> {
    let slate_dir = base_dir.join(SLATE_DIR_NAME);

    if is_initialized(base_dir) {
        return Err(Error::Config(format!(
            "Slate is already initialized in this directory. Found existing '{SLATE_DIR_NAME}'"
        )));
    }

    let config = match data_file {
        Some(path) if path.trim().is_empty() => {
            return Err(Error::Config("Data file path cannot be empty".to_string()));
        }
        Some(path) => SlateConfig::new(path.trim()),
        None => SlateConfig::new(format!("{SLATE_DIR_NAME}/{DOCUMENT_FILE_NAME}")),
    };
    let document_file = config
        .storage
        .to_backend_with(base_dir, None)?
        .data_path()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::Config("Configured backend has no data file".to_string()))?;

    fs::create_dir_all(&slate_dir).await?;

    let config_file = slate_dir.join(CONFIG_FILE_NAME);
    config.save(&config_file).await?;

    save_document(&document_file, &Document::default()).await?;

    debug!(
        slate_dir = %slate_dir.display(),
        document = %document_file.display(),
        "Initialized repository"
    );

    Ok(InitResult {
        slate_dir,
        config_file,
        document_file,
    })
}

/// Check if a directory has been initialized with slate.
///
/// Returns `true` if the `.slate/` directory exists.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(SLATE_DIR_NAME).exists()
}
