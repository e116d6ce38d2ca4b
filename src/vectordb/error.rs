use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
/// Errors returned by vector index operations.
pub enum VectorDbError {
    /// Vector length differs from the index dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Index dimension.
        expected: usize,
        /// Length of the offending vector.
        actual: usize,
    },

    #[error("index dimension must be positive")]
    ZeroDimension,

    #[error("vector contains non-finite values")]
    NonFiniteVector,

    /// Index vectors came from a different embedder backend.
    #[error("index was built with the {index} embedder, not {embedder}")]
    EmbedderMismatch { index: String, embedder: String },

    /// Persisted artifacts are missing, undecodable or inconsistent.
    #[error("index at {path} is corrupt: {reason}")]
    IndexCorrupt { path: PathBuf, reason: String },

    #[error("index not found at path: {path}")]
    NotFound { path: PathBuf },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}
