use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TEXT_CHARS, MAX_TITLE_CHARS, truncate_chars};

/// Untrusted ingestion record as it appears on a JSONL line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDocument {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Ingested news document. Immutable once constructed.
///
/// # Example
/// ```rust
/// use newsprobe::corpus::{Document, RawDocument};
///
/// let doc = Document::from_raw(RawDocument {
///     title: "Budget passes".into(),
///     text: "Parliament approved the budget.".into(),
///     url: "https://example.org/a".into(),
/// });
/// assert_eq!(doc.embedding_text(), "Budget passes. Parliament approved the budget.");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
pub struct Document {
    title: String,
    text: String,
    url: String,
}

impl Document {
    /// Builds a document, trimming `title` and `text` and then truncating them
    /// to their limits.
    pub fn new(title: impl AsRef<str>, text: impl AsRef<str>, url: impl Into<String>) -> Self {
        Self {
            title: truncate_chars(title.as_ref().trim(), MAX_TITLE_CHARS).to_string(),
            text: truncate_chars(text.as_ref().trim(), MAX_TEXT_CHARS).to_string(),
            url: url.into(),
        }
    }

    /// Validates an ingestion record (defaults already applied by serde).
    pub fn from_raw(raw: RawDocument) -> Self {
        Self::new(raw.title, raw.text, raw.url)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text fed to the sentence encoder: `"{title}. {text}"`.
    pub fn embedding_text(&self) -> String {
        compose_embedding_text(&self.title, &self.text)
    }
}

/// Joins a title and body the same way documents are embedded at index time.
///
/// An empty (or whitespace-only) title yields the body alone.
pub fn compose_embedding_text(title: &str, text: &str) -> String {
    if title.trim().is_empty() {
        text.to_string()
    } else {
        format!("{}. {}", title, text)
    }
}
