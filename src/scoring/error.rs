use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::constants::DimValidationError;
use crate::embedding::EmbeddingError;
use crate::features::FeatureError;
use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector index error: {0}")]
    VectorDb(#[from] VectorDbError),

    #[error("embedder and index disagree: {0}")]
    Dimension(#[from] DimValidationError),

    #[error("index was built with the {index} embedder but {embedder} is loaded")]
    EmbedderMismatch {
        index: String,
        embedder: &'static str,
    },
}

impl ScoringError {
    /// True when the caller supplied unusable input (as opposed to a server fault).
    pub fn is_empty_input(&self) -> bool {
        matches!(
            self,
            ScoringError::EmptyInput
                | ScoringError::Embedding(EmbeddingError::EmptyInput)
                | ScoringError::Classifier(ClassifierError::Feature(FeatureError::EmptyInput))
        )
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            _ if self.is_empty_input() => "empty_input",
            ScoringError::Classifier(ClassifierError::ModelNotFound { .. })
            | ScoringError::Embedding(EmbeddingError::ModelNotFound { .. }) => "model_not_found",
            ScoringError::VectorDb(VectorDbError::NotFound { .. }) => "index_not_found",
            ScoringError::VectorDb(VectorDbError::IndexCorrupt { .. }) => "index_corrupt",
            ScoringError::VectorDb(VectorDbError::DimensionMismatch { .. })
            | ScoringError::Classifier(ClassifierError::DimensionMismatch { .. })
            | ScoringError::Dimension(_) => "dimension_mismatch",
            ScoringError::VectorDb(VectorDbError::EmbedderMismatch { .. })
            | ScoringError::EmbedderMismatch { .. } => "embedder_mismatch",
            ScoringError::Classifier(ClassifierError::InvalidThreshold { .. }) => {
                "invalid_threshold"
            }
            ScoringError::Classifier(_) => "classifier_error",
            ScoringError::Embedding(_) => "embedding_error",
            ScoringError::VectorDb(_) => "index_error",
            ScoringError::EmptyInput => "empty_input",
        }
    }
}
