use std::sync::Arc;

use tracing::info;

use super::error::ScoringError;
use super::pipeline::{ScoringPipeline, check_compatible};
use crate::classifier::Classifier;
use crate::config::Config;
use crate::embedding::{EmbedderConfig, SentenceEmbedder, TextEmbedder};
use crate::vectordb::VectorIndex;

/// Components loaded once per process and shared by every request.
#[derive(Clone)]
pub struct ServingContext {
    classifier: Arc<Classifier>,
    index: Arc<VectorIndex>,
    embedder: Arc<dyn TextEmbedder>,
    top_k: usize,
    threshold: f32,
}

impl std::fmt::Debug for ServingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServingContext")
            .field("vocabulary", &self.classifier.vocabulary().len())
            .field("index_rows", &self.index.len())
            .field("index_dim", &self.index.dim())
            .field("embedder", &self.embedder.mode())
            .field("top_k", &self.top_k)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl ServingContext {
    /// Assembles a context from already-loaded parts.
    ///
    /// The embedder must match the index in dimension and, when the index
    /// records one, in backend.
    pub fn new(
        classifier: Arc<Classifier>,
        index: Arc<VectorIndex>,
        embedder: Arc<dyn TextEmbedder>,
        top_k: usize,
        threshold: f32,
    ) -> Result<Self, ScoringError> {
        check_compatible(&index, embedder.as_ref())?;
        Ok(Self {
            classifier,
            index,
            embedder,
            top_k,
            threshold,
        })
    }

    /// Loads the classifier, the index and the embedder named by `config`.
    pub fn load(config: &Config) -> Result<Self, ScoringError> {
        let classifier = Classifier::load(&config.classifier_path)?;
        let index = VectorIndex::load(&config.index_dir)?;

        let embedder_config = EmbedderConfig::from_model_dir(config.embedder_path.clone())
            .with_embedding_dim(index.dim());
        let embedder = SentenceEmbedder::load(embedder_config)?;

        info!(
            classifier = %config.classifier_path.display(),
            index = %config.index_dir.display(),
            index_rows = index.len(),
            embedder = embedder.mode(),
            "Serving context loaded"
        );

        Self::new(
            Arc::new(classifier),
            Arc::new(index),
            Arc::new(embedder),
            config.top_k,
            config.threshold,
        )
    }

    pub fn pipeline(&self) -> ScoringPipeline<'_> {
        ScoringPipeline::from_validated(
            &self.classifier,
            &self.index,
            self.embedder.as_ref(),
            self.top_k,
            self.threshold,
        )
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn embedder(&self) -> &dyn TextEmbedder {
        self.embedder.as_ref()
    }
}
