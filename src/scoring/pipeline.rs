use tracing::{debug, instrument};

use super::error::ScoringError;
use super::types::{AnalysisResult, AnalyzeRequest, Evidence, Verification};
use crate::classifier::Classifier;
use crate::constants::validate_embedding_dim;
use crate::embedding::TextEmbedder;
use crate::vectordb::VectorIndex;

/// Borrowed view over loaded components, used for one or more analyses.
pub struct ScoringPipeline<'a> {
    classifier: &'a Classifier,
    index: &'a VectorIndex,
    embedder: &'a dyn TextEmbedder,
    top_k: usize,
    threshold: f32,
}

impl std::fmt::Debug for ScoringPipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringPipeline")
            .field("index_rows", &self.index.len())
            .field("embedder", &self.embedder.mode())
            .field("top_k", &self.top_k)
            .field("threshold", &self.threshold)
            .finish()
    }
}

/// Embedder output must match the index dimension and, when the index records
/// one, the backend that built it.
pub(crate) fn check_compatible(
    index: &VectorIndex,
    embedder: &dyn TextEmbedder,
) -> Result<(), ScoringError> {
    validate_embedding_dim(embedder.embedding_dim(), index.dim())?;
    match index.embedder_mode() {
        Some(mode) if mode != embedder.mode() => Err(ScoringError::EmbedderMismatch {
            index: mode.to_string(),
            embedder: embedder.mode(),
        }),
        _ => Ok(()),
    }
}

impl<'a> ScoringPipeline<'a> {
    /// Fails if the embedder cannot produce vectors comparable with the index.
    pub fn new(
        classifier: &'a Classifier,
        index: &'a VectorIndex,
        embedder: &'a dyn TextEmbedder,
        top_k: usize,
        threshold: f32,
    ) -> Result<Self, ScoringError> {
        check_compatible(index, embedder)?;
        Ok(Self {
            classifier,
            index,
            embedder,
            top_k,
            threshold,
        })
    }

    /// Skips [`check_compatible`]; callers guarantee it already passed.
    pub(crate) fn from_validated(
        classifier: &'a Classifier,
        index: &'a VectorIndex,
        embedder: &'a dyn TextEmbedder,
        top_k: usize,
        threshold: f32,
    ) -> Self {
        Self {
            classifier,
            index,
            embedder,
            top_k,
            threshold,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Classifies `request.text` and retrieves the `top_k` nearest documents.
    #[instrument(skip_all, fields(text_len = request.text.len(), top_k = self.top_k))]
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ScoringError> {
        if request.text.trim().is_empty() {
            return Err(ScoringError::EmptyInput);
        }

        let classification = self.classifier.predict(&request.text, self.threshold)?;

        let query = self.embedder.embed(&request.semantic_query())?;
        let hits = self.index.query(&query, self.top_k)?;

        debug!(
            label = classification.label,
            fake_probability = classification.fake_probability,
            evidence = hits.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            classification,
            verification: Verification::unverified(hits.into_iter().map(Evidence::from).collect()),
        })
    }
}
