//! Resilient document reading.
//!
//! [`read_json_resilient`] separates two kinds of failure:
//!
//! - **Unusable content** (missing file, empty file, bad syntax, wrong
//!   shape) is returned as [`ReadOutcome::Unusable`] with a [`Warning`]
//! - **Everything else** (permission denied, the path is a directory)
//!   is returned as an [`Error`](crate::Error)

use crate::{Result, Warning};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::io;
use std::path::Path;
use tracing::trace;

/// The result of reading a document.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    /// The document was read and deserialized.
    Loaded(T),

    /// The stored content cannot be used; the warning says why.
    Unusable(Warning),
}

impl<T> ReadOutcome<T> {
    /// Returns the loaded document, discarding any warning.
    pub fn into_loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Unusable(_) => None,
        }
    }

    /// Returns the warning if the content was unusable.
    pub fn warning(&self) -> Option<&Warning> {
        match self {
            Self::Loaded(_) => None,
            Self::Unusable(warning) => Some(warning),
        }
    }
}

/// Reads and deserializes the document stored at `path`.
///
/// # Errors
///
/// Returns an error for any I/O failure other than the file not existing.
///
/// # Examples
///
/// ```no_run
/// use slate_doc::{read_json_resilient, ReadOutcome};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Counter {
///     value: u64,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// match read_json_resilient::<Counter, _>("state/counter.json").await? {
///     ReadOutcome::Loaded(counter) => println!("value = {}", counter.value),
///     ReadOutcome::Unusable(warning) => eprintln!("starting over: {warning}"),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn read_json_resilient<T, P>(path: P) -> Result<ReadOutcome<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!(path = %path.display(), "Document not found");
            return Ok(ReadOutcome::Unusable(Warning::Missing));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(parse_document(&bytes))
}

/// Deserializes a document from raw bytes, classifying unusable content.
pub fn parse_document<T: DeserializeOwned>(bytes: &[u8]) -> ReadOutcome<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return ReadOutcome::Unusable(Warning::Empty);
    }

    match serde_json::from_slice(bytes) {
        Ok(value) => ReadOutcome::Loaded(value),
        Err(e) => ReadOutcome::Unusable(classify(&e)),
    }
}

fn classify(err: &serde_json::Error) -> Warning {
    let (line, column, error) = (err.line(), err.column(), err.to_string());
    match err.classify() {
        Category::Data => Warning::SchemaMismatch {
            line,
            column,
            error,
        },
        Category::Syntax | Category::Eof | Category::Io => Warning::MalformedJson {
            line,
            column,
            error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Counter {
        value: u64,
    }

    #[test]
    fn parse_valid_document() {
        let outcome = parse_document::<Counter>(br#"{"value": 9}"#);
        assert_eq!(outcome, ReadOutcome::Loaded(Counter { value: 9 }));
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::spaces(b"   ".as_slice())]
    #[case::newlines(b"\n\n\t\n".as_slice())]
    fn parse_blank_content_is_empty(#[case] bytes: &[u8]) {
        let outcome = parse_document::<Counter>(bytes);
        assert_eq!(outcome.warning(), Some(&Warning::Empty));
    }

    #[rstest]
    #[case::truncated(br#"{"value": "#.as_slice())]
    #[case::garbage(b"not json at all".as_slice())]
    #[case::trailing_comma(br#"{"value": 1,}"#.as_slice())]
    fn parse_bad_syntax_is_malformed(#[case] bytes: &[u8]) {
        let outcome = parse_document::<Counter>(bytes);
        assert!(matches!(
            outcome.warning(),
            Some(Warning::MalformedJson { .. })
        ));
    }

    #[rstest]
    #[case::wrong_type(br#"{"value": "seven"}"#.as_slice())]
    #[case::missing_field(br#"{"other": 1}"#.as_slice())]
    #[case::negative(br#"{"value": -1}"#.as_slice())]
    #[case::fractional(br#"{"value": 1.5}"#.as_slice())]
    #[case::bare_number(b"42".as_slice())]
    #[case::bare_string(br#""text""#.as_slice())]
    fn parse_wrong_shape_is_schema_mismatch(#[case] bytes: &[u8]) {
        let outcome = parse_document::<Counter>(bytes);
        assert!(matches!(
            outcome.warning(),
            Some(Warning::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn into_loaded_discards_warning() {
        let outcome = parse_document::<Counter>(b"");
        assert!(outcome.into_loaded().is_none());
    }

    #[tokio::test]
    async fn read_missing_file_is_reported_not_failed() {
        let dir = tempfile::TempDir::new().unwrap();
        let outcome = read_json_resilient::<Counter, _>(dir.path().join("absent.json"))
            .await
            .unwrap();
        assert_eq!(outcome.warning(), Some(&Warning::Missing));
    }

    #[tokio::test]
    async fn read_directory_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = read_json_resilient::<Counter, _>(dir.path()).await;
        assert!(result.is_err());
    }
}
