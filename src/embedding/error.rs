use std::path::PathBuf;
use thiserror::Error;

/// Failures of the semantic encoder.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Nothing left to encode after trimming.
    #[error("cannot embed empty text")]
    EmptyInput,

    #[error("sentence model file missing: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("sentence model could not be loaded: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("sentence encoding failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenizer error: {reason}")]
    TokenizationFailed { reason: String },

    #[error("embedder misconfigured: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        Self::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        Self::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
