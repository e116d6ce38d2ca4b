use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::error::EmbeddingError;

/// Files a sentence-model directory must contain.
pub const MODEL_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
pub struct EmbedderConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// Output embedding dimension (must equal the model hidden size).
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl EmbedderConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Builds a config from an optional model directory; `None` means stub mode.
    pub fn from_model_dir(model_dir: Option<PathBuf>) -> Self {
        match model_dir {
            Some(dir) => Self::new(dir),
            None => Self::stub(),
        }
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be positive".to_string(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be positive".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if let Some(missing) = self.missing_file() {
            return Err(EmbeddingError::ModelNotFound { path: missing });
        }

        Ok(())
    }

    /// First required model file that does not exist, if any.
    pub fn missing_file(&self) -> Option<PathBuf> {
        MODEL_FILES
            .iter()
            .map(|name| self.model_dir.join(name))
            .find(|path| !path.is_file())
    }

    pub fn model_available(&self) -> bool {
        !self.model_dir.as_os_str().is_empty() && self.missing_file().is_none()
    }
}
