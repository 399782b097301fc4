//! Content sources
//!
//! Turn input documents into ordered [`ContentItem`]s. Two producers are supported:
//!
//! - tagged text: one item per non-empty line ([`text`])
//! - HTML: one item per `div` with text ([`html`]), the layout the question generator exports
//!
//! [`load_items`] picks the producer from the file extension.

pub mod html;
pub mod text;

use crate::sequencer::ContentItem;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors while reading an input document.
#[derive(Debug)]
pub enum SourceError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { path, source } => {
                write!(f, "Cannot read '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
        }
    }
}

/// Which producer a document is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    TaggedText,
    Html,
}

impl SourceKind {
    pub fn for_path(path: &Path) -> Self {
        let is_html = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .is_some_and(|e| e == "html" || e == "htm");
        if is_html {
            SourceKind::Html
        } else {
            SourceKind::TaggedText
        }
    }
}

/// Read a document from disk into items.
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<ContentItem>, SourceError> {
    let path = path.as_ref();
    let source = read_to_string(path)?;
    let items = items_from_str(&source, SourceKind::for_path(path));
    tracing::info!(path = %path.display(), items = items.len(), "loaded items");
    Ok(items)
}

/// Split source text into items with the given producer.
pub fn items_from_str(source: &str, kind: SourceKind) -> Vec<ContentItem> {
    match kind {
        SourceKind::TaggedText => text::items_from_text(source),
        SourceKind::Html => html::items_from_html(source),
    }
}

/// Read a whole input file, reporting the path on failure.
pub fn read_to_string(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(SourceKind::for_path(Path::new("a.html")), SourceKind::Html);
        assert_eq!(SourceKind::for_path(Path::new("a.HTM")), SourceKind::Html);
        assert_eq!(
            SourceKind::for_path(Path::new("a.txt")),
            SourceKind::TaggedText
        );
        assert_eq!(SourceKind::for_path(Path::new("a")), SourceKind::TaggedText);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_items("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
