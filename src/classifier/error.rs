use std::path::PathBuf;
use thiserror::Error;

use crate::features::FeatureError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier artifact not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("training corpus is empty")]
    EmptyCorpus,

    #[error("training corpus contains a single class (label {label})")]
    SingleClass { label: u8 },

    #[error("model dimension mismatch: {vocabulary} terms, {weights} weights, {idf} idf values")]
    DimensionMismatch {
        vocabulary: usize,
        weights: usize,
        idf: usize,
    },

    #[error("invalid classifier artifact: {reason}")]
    InvalidArtifact { reason: String },

    #[error("threshold {value} is outside [0, 1]")]
    InvalidThreshold { value: f32 },

    #[error("invalid label {label:?} on row {row} (expected 0 or 1)")]
    InvalidLabel { row: usize, label: String },

    #[error("failed to read training data: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
