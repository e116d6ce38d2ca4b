use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("vocabulary is inconsistent: {reason}")]
    InvalidVocabulary { reason: String },
}
