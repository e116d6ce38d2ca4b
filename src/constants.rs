//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Dimension Invariants
//!
//! The embedding dimension is fixed per index. The default matches the
//! all-MiniLM-L6-v2 family (384). Use [`validate_embedding_dim`] at module
//! boundaries (embedder ↔ index) to catch mismatches before serving.

use thiserror::Error;

pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max sequence length fed to the sentence encoder (MiniLM position limit).
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Titles longer than this are truncated at ingestion (chars, not bytes).
pub const MAX_TITLE_CHARS: usize = 200;

/// Bodies longer than this are truncated at ingestion and before encoding.
pub const MAX_TEXT_CHARS: usize = 2000;

/// Default number of evidence documents returned by `analyze`.
pub const DEFAULT_TOP_K: usize = 5;

/// Default vocabulary size kept by classifier training.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Default training iteration cap.
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Default decision threshold on the fake probability.
pub const DEFAULT_FAKE_THRESHOLD: f32 = 0.5;

/// Largest n-gram produced by the lexical tokenizer.
pub const MAX_NGRAM: usize = 2;

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    #[error("embedding dimension cannot be zero")]
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use newsprobe::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).unwrap();
/// assert!(validate_embedding_dim(2, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Truncates `input` to at most `max_chars` Unicode scalar values.
///
/// Never splits a code point; returns the input unchanged when it already fits.
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &input[..byte_idx],
        None => input,
    }
}
