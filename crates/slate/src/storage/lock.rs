//! Advisory lock file guarding a document across processes.
//!
//! The lock is a sibling file named `<document>.lock`, created with
//! `create_new` so only one holder can exist at a time. It records the
//! holder's pid and acquisition time and is removed when the guard drops.
//! A holder that crashes leaves the file behind; it has to be deleted by
//! hand before the document can be written again.

use crate::error::{Error, Result};
use chrono::Utc;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace};

/// How long [`DocumentLock::acquire`] keeps retrying a held lock.
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(10);

const INITIAL_BACKOFF: Duration = Duration::from_millis(2);
const MAX_BACKOFF: Duration = Duration::from_millis(50);

/// Path of the lock file for the document at `document_path`.
pub fn lock_path(document_path: &Path) -> PathBuf {
    let mut path: OsString = document_path.as_os_str().to_os_string();
    path.push(".lock");
    PathBuf::from(path)
}

/// Exclusive hold on a document. Released on drop.
#[derive(Debug)]
pub struct DocumentLock {
    held: Option<HeldLock>,
}

#[derive(Debug)]
struct HeldLock {
    path: PathBuf,
    _file: File,
}

impl DocumentLock {
    /// A guard for stores that need no file lock.
    pub fn unlocked() -> Self {
        Self { held: None }
    }

    /// Take the lock for `document_path`, waiting up to [`LOCK_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockBusy`] if another holder keeps the lock past the
    /// timeout, or an I/O error if the lock file cannot be created.
    pub async fn acquire(document_path: &Path) -> Result<Self> {
        Self::acquire_within(document_path, LOCK_TIMEOUT).await
    }

    /// Take the lock for `document_path`, waiting up to `timeout`.
    ///
    /// # Errors
    ///
    /// See [`DocumentLock::acquire`].
    pub async fn acquire_within(document_path: &Path, timeout: Duration) -> Result<Self> {
        let path = lock_path(document_path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let deadline = tokio::time::Instant::now() + timeout;
        let mut backoff = INITIAL_BACKOFF;
        loop {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    let stamp = format!(
                        "pid={}\nutc={}\n",
                        std::process::id(),
                        Utc::now().to_rfc3339()
                    );
                    // The stamp is informational; the file's existence is the lock.
                    let _ = file.write_all(stamp.as_bytes()).await;
                    debug!(lock = %path.display(), "Acquired document lock");
                    return Ok(Self {
                        held: Some(HeldLock { path, _file: file }),
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if tokio::time::Instant::now() >= deadline {
                        return Err(Error::LockBusy {
                            lock_path: path.display().to_string(),
                        });
                    }
                    trace!(lock = %path.display(), ?backoff, "Document lock busy, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Whether this guard holds a lock file.
    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }
}

impl Drop for HeldLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!(lock = %self.path.display(), error = %e, "Failed to remove document lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_path_appends_suffix() {
        assert_eq!(
            lock_path(Path::new("/repo/.slate/issues.json")),
            Path::new("/repo/.slate/issues.json.lock")
        );
    }

    #[tokio::test]
    async fn lock_file_exists_only_while_held() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("issues.json");

        let guard = DocumentLock::acquire(&document).await.unwrap();
        assert!(guard.is_held());
        let contents = tokio::fs::read_to_string(lock_path(&document)).await.unwrap();
        assert!(contents.starts_with(&format!("pid={}", std::process::id())));

        drop(guard);
        assert!(!lock_path(&document).exists());
    }

    #[tokio::test]
    async fn second_holder_times_out_while_first_holds() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("issues.json");
        let _first = DocumentLock::acquire(&document).await.unwrap();

        let second = DocumentLock::acquire_within(&document, Duration::from_millis(20)).await;

        assert!(matches!(second, Err(Error::LockBusy { .. })));
    }

    #[tokio::test]
    async fn waiter_gets_lock_after_release() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("issues.json");
        let first = DocumentLock::acquire(&document).await.unwrap();

        let waiter = {
            let document = document.clone();
            tokio::spawn(async move { DocumentLock::acquire(&document).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(first);

        assert!(waiter.await.unwrap().unwrap().is_held());
    }

    #[tokio::test]
    async fn lock_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join(".slate").join("issues.json");

        let guard = DocumentLock::acquire(&document).await.unwrap();

        assert!(lock_path(&document).exists());
        drop(guard);
    }

    #[test]
    fn unlocked_guard_holds_nothing() {
        assert!(!DocumentLock::unlocked().is_held());
    }
}
