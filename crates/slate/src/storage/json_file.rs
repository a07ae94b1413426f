//! JSON file persistence for the issue document.

use super::{DocumentLock, DocumentStore};
use crate::domain::Document;
use crate::error::Result;
use async_trait::async_trait;
use slate_doc::{ReadOutcome, read_json_resilient, write_json_atomic};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Why a stored document was discarded during loading.
///
/// See [`slate_doc::Warning`] for the variants.
pub use slate_doc::Warning as LoadWarning;

/// Document store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the document at `path`.
    ///
    /// Nothing is touched on disk until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the document file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Document> {
        let (document, _warning) = load_document(&self.path).await?;
        Ok(document)
    }

    async fn save(&self, document: &Document) -> Result<()> {
        save_document(&self.path, document).await
    }

    async fn read(&self) -> Result<Document> {
        let outcome = read_json_resilient::<Document, _>(&self.path).await?;
        if let Some(warning) = outcome.warning() {
            debug!(
                path = %self.path.display(),
                reason = warning.kind(),
                "Reading unusable document as empty"
            );
        }
        Ok(outcome.into_loaded().unwrap_or_default())
    }

    async fn lock(&self) -> Result<DocumentLock> {
        DocumentLock::acquire(&self.path).await
    }
}

/// Load the document at `path`, recovering from unusable content.
///
/// When the file is missing, empty, not valid JSON, or not shaped like a
/// [`Document`], the default document is written to `path` and returned
/// together with the reason.
///
/// # Errors
///
/// Returns an error for I/O failures other than a missing file, and if the
/// recovered default cannot be written.
///
/// # Example
///
/// ```no_run
/// # use slate::storage::load_document;
/// # use std::path::Path;
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> anyhow::Result<()> {
/// let (document, warning) = load_document(Path::new(".slate/issues.json")).await?;
/// if let Some(warning) = warning {
///     eprintln!("Started from an empty document: {warning}");
/// }
/// println!("next key number: {}", document.issue_key_counter);
/// # Ok(())
/// # }
/// ```
pub async fn load_document(path: &Path) -> Result<(Document, Option<LoadWarning>)> {
    match read_json_resilient::<Document, _>(path).await? {
        ReadOutcome::Loaded(document) => {
            debug!(
                path = %path.display(),
                issues = document.issues.len(),
                counter = document.issue_key_counter,
                "Loaded document"
            );
            Ok((document, None))
        }
        ReadOutcome::Unusable(warning) => {
            if warning == LoadWarning::Missing {
                debug!(path = %path.display(), "No document yet, creating an empty one");
            } else {
                warn!(
                    path = %path.display(),
                    reason = warning.kind(),
                    "Discarding unusable document ({warning}), resetting to empty"
                );
            }
            let document = Document::default();
            save_document(path, &document).await?;
            Ok((document, Some(warning)))
        }
    }
}

/// Atomically write `document` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or any I/O step fails; the previous
/// file is then left unchanged.
pub async fn save_document(path: &Path, document: &Document) -> Result<()> {
    write_json_atomic(path, document).await?;
    debug!(
        path = %path.display(),
        issues = document.issues.len(),
        counter = document.issue_key_counter,
        "Saved document"
    );
    Ok(())
}
