use serde::Serialize;
use tracing::debug;

use super::error::ClassifierError;
use crate::constants::DEFAULT_FAKE_THRESHOLD;
use crate::features::{LexicalVector, Vocabulary};

/// Numerically stable logistic function.
pub fn sigmoid(z: f32) -> f32 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}

/// Result of classifying one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    /// `1` means fake, `0` means real.
    pub label: u8,
    pub fake_probability: f32,
}

impl Classification {
    pub fn is_fake(&self) -> bool {
        self.label == 1
    }
}

/// Fitted logistic-regression model over a TF-IDF vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    vocabulary: Vocabulary,
    weights: Vec<f32>,
    bias: f32,
}

impl Classifier {
    /// Assembles a model, checking that weights line up with the vocabulary.
    pub fn new(vocabulary: Vocabulary, weights: Vec<f32>, bias: f32) -> Result<Self, ClassifierError> {
        if weights.len() != vocabulary.len() {
            return Err(ClassifierError::DimensionMismatch {
                vocabulary: vocabulary.len(),
                weights: weights.len(),
                idf: vocabulary.idf().len(),
            });
        }
        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::InvalidArtifact {
                reason: "non-finite model parameters".to_string(),
            });
        }

        Ok(Self {
            vocabulary,
            weights,
            bias,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// Probability in `[0, 1]` that the encoded text is fake.
    pub fn score(&self, features: &LexicalVector) -> f32 {
        sigmoid(features.dot(&self.weights) + self.bias)
    }

    /// Classifies `text`; label is `1` iff the probability reaches `threshold`.
    pub fn predict(&self, text: &str, threshold: f32) -> Result<Classification, ClassifierError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ClassifierError::InvalidThreshold { value: threshold });
        }

        let features = self.vocabulary.encode(text)?;
        let fake_probability = self.score(&features);
        let label = u8::from(fake_probability >= threshold);

        debug!(
            terms = features.len(),
            fake_probability,
            threshold,
            label,
            "Classified text"
        );

        Ok(Classification {
            label,
            fake_probability,
        })
    }

    /// [`predict`](Self::predict) at the default threshold.
    pub fn predict_default(&self, text: &str) -> Result<Classification, ClassifierError> {
        self.predict(text, DEFAULT_FAKE_THRESHOLD)
    }
}
