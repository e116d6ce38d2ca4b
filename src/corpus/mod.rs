//! Ingested documents and the append-only corpus store.
//!
//! Raw JSONL records are validated once at the ingestion boundary
//! ([`Document::from_raw`]): missing fields default to empty strings and
//! oversized fields are truncated to [`MAX_TITLE_CHARS`]/[`MAX_TEXT_CHARS`].
//!
//! [`MAX_TITLE_CHARS`]: crate::constants::MAX_TITLE_CHARS
//! [`MAX_TEXT_CHARS`]: crate::constants::MAX_TEXT_CHARS

pub mod document;
pub mod error;
pub mod ingest;
pub mod store;


pub use document::{ArchivedDocument, Document, RawDocument, compose_embedding_text};
pub use error::{CorpusError, CorpusResult};
pub use ingest::{load_jsonl, parse_jsonl};
pub use store::CorpusStore;
