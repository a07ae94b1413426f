//! Atomic write operations for JSON documents.
//!
//! Documents are written with the temp-file-then-rename pattern:
//!
//! 1. The document is serialized in memory first, so a serialization error
//!    never touches the filesystem
//! 2. The bytes are written to a uniquely named sibling temporary file
//!    (`.<name>.<random>.tmp`), flushed and synced
//! 3. The temporary file is renamed over the target path
//!
//! Every write gets its own temporary file, so concurrent writers to the
//! same target never rename each other's data away. On POSIX systems a
//! rename within one filesystem is atomic, so a reader sees either the
//! previous document or the new one. If the process dies during step 2 the
//! original file remains intact.
//!
//! # Examples
//!
//! ```no_run
//! use slate_doc::write_json_atomic;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Counter {
//!     value: u64,
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! write_json_atomic("state/counter.json", &Counter { value: 7 }).await?;
//! # Ok(())
//! # }
//! ```

use crate::{Error, Result};
use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const TEMP_SUFFIX: &str = ".tmp";

/// Atomically replaces the file at `path` with the JSON form of `value`.
///
/// The document is pretty-printed and terminated by a newline. Missing
/// parent directories are created first.
///
/// # Errors
///
/// Returns an error if:
/// - `path` has no file name component
/// - `value` fails to serialize
/// - the parent directory or temporary file cannot be created or written
/// - the final rename fails (e.g., cross-filesystem move)
///
/// On failure the previous file (if any) is left unchanged and the
/// temporary file is removed.
pub async fn write_json_atomic<T, P>(path: P, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let Some(file_name) = path.file_name() else {
        return Err(Error::InvalidPath(path.display().to_string()));
    };

    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    let len = bytes.len();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(parent).await?;
            parent.to_path_buf()
        }
        _ => PathBuf::from("."),
    };

    let prefix = temp_prefix(file_name);
    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || persist_bytes(&dir, &prefix, &target, &bytes))
        .await
        .map_err(std::io::Error::other)??;

    debug!(path = %path.display(), bytes = len, "Wrote document");
    Ok(())
}

/// Prefix of the temporary files used while writing `file_name`.
///
/// The leading dot keeps them out of plain directory listings.
fn temp_prefix(file_name: &OsStr) -> OsString {
    let mut prefix = OsString::from(".");
    prefix.push(file_name);
    prefix.push(".");
    prefix
}

/// Write `bytes` to a fresh temporary file in `dir` and rename it to `target`.
///
/// The temporary file is deleted when any step fails.
fn persist_bytes(dir: &Path, prefix: &OsStr, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
