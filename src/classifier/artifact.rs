//! On-disk classifier format.
//!
//! A single rkyv archive holding the vocabulary terms, their IDF weights, the
//! logistic weights and the bias. Written through
//! [`write_atomic`](crate::storage::write_atomic) and validated on load.

use std::path::Path;

use rkyv::rancor::Error as RkyvError;
use rkyv::{Archive, Deserialize, Serialize};
use tracing::info;

use super::error::ClassifierError;
use super::model::Classifier;
use crate::features::Vocabulary;
use crate::storage::{MmapFileHandle, StorageError, write_atomic};

/// Bumped whenever the archived layout changes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Archive, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClassifierArtifact {
    pub format_version: u32,
    pub terms: Vec<String>,
    pub idf: Vec<f32>,
    pub weights: Vec<f32>,
    pub bias: f32,
}

impl From<&Classifier> for ClassifierArtifact {
    fn from(model: &Classifier) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            terms: model.vocabulary().terms().to_vec(),
            idf: model.vocabulary().idf().to_vec(),
            weights: model.weights().to_vec(),
            bias: model.bias(),
        }
    }
}

impl ClassifierArtifact {
    /// Checks version and lengths, then rebuilds the model.
    pub fn into_classifier(self) -> Result<Classifier, ClassifierError> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ClassifierError::InvalidArtifact {
                reason: format!(
                    "unsupported format version {} (expected {})",
                    self.format_version, ARTIFACT_FORMAT_VERSION
                ),
            });
        }

        if self.terms.len() != self.weights.len() || self.terms.len() != self.idf.len() {
            return Err(ClassifierError::DimensionMismatch {
                vocabulary: self.terms.len(),
                weights: self.weights.len(),
                idf: self.idf.len(),
            });
        }

        let vocabulary = Vocabulary::from_parts(self.terms, self.idf).map_err(|e| {
            ClassifierError::InvalidArtifact {
                reason: e.to_string(),
            }
        })?;

        Classifier::new(vocabulary, self.weights, self.bias)
    }
}

impl Classifier {
    /// Persists the model atomically to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ClassifierError> {
        let artifact = ClassifierArtifact::from(self);
        let bytes = rkyv::to_bytes::<RkyvError>(&artifact)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let written = write_atomic(path, &bytes)?;
        info!(
            path = %path.display(),
            bytes = written,
            vocabulary = artifact.terms.len(),
            "Classifier saved"
        );
        Ok(())
    }

    /// Loads and validates a model written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        if !path.is_file() {
            return Err(ClassifierError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let invalid = |e: StorageError| ClassifierError::InvalidArtifact {
            reason: e.to_string(),
        };

        let handle = MmapFileHandle::open(path).map_err(invalid)?;
        let archived = handle
            .access_archived::<ArchivedClassifierArtifact>()
            .map_err(invalid)?;
        let artifact = rkyv::deserialize::<ClassifierArtifact, RkyvError>(archived).map_err(|e| {
            ClassifierError::InvalidArtifact {
                reason: e.to_string(),
            }
        })?;

        let model = artifact.into_classifier()?;
        info!(
            path = %path.display(),
            vocabulary = model.vocabulary().len(),
            "Classifier loaded"
        );
        Ok(model)
    }
}
