use tracing::{info, warn};

use super::error::VectorDbError;
use super::index::VectorIndex;
use crate::corpus::Document;
use crate::embedding::{EmbeddingError, TextEmbedder};

/// Documents embedded per encoder call.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Embeds documents in batches and appends them to a [`VectorIndex`].
///
/// Each document is embedded as `"{title}. {text}"`. Documents with nothing
/// to embed are skipped with a warning.
pub struct IndexBuilder<'a> {
    embedder: &'a dyn TextEmbedder,
    batch_size: usize,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(embedder: &'a dyn TextEmbedder) -> Self {
        Self {
            embedder,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Builds a fresh index sized to the embedder.
    pub fn build(&self, documents: Vec<Document>) -> Result<VectorIndex, VectorDbError> {
        let mut index = VectorIndex::new(self.embedder.embedding_dim())?;
        self.extend(&mut index, documents)?;
        Ok(index)
    }

    /// Appends `documents` to `index`; returns how many were inserted.
    ///
    /// An index built with one embedder backend is never extended with
    /// vectors from another.
    pub fn extend(
        &self,
        index: &mut VectorIndex,
        documents: Vec<Document>,
    ) -> Result<usize, VectorDbError> {
        let mode = self.embedder.mode();
        index.check_embedder_mode(mode)?;

        let total = documents.len();
        let kept: Vec<Document> = documents
            .into_iter()
            .filter(|doc| {
                let empty = doc.embedding_text().trim().is_empty();
                if empty {
                    warn!(url = doc.url(), "Skipping document with no text to embed");
                }
                !empty
            })
            .collect();
        let skipped = total - kept.len();

        let mut inserted = 0;
        let mut remaining = kept.into_iter().peekable();
        while remaining.peek().is_some() {
            let batch: Vec<Document> = remaining.by_ref().take(self.batch_size).collect();
            let texts: Vec<String> = batch.iter().map(Document::embedding_text).collect();
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

            let vectors = self.embedder.embed_batch(&refs)?;
            if vectors.len() != batch.len() {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("{} vectors for {} texts", vectors.len(), batch.len()),
                }
                .into());
            }

            for (vector, doc) in vectors.iter().zip(batch) {
                index.insert(vector, doc)?;
                inserted += 1;
            }
        }
        index.bind_embedder_mode(mode)?;

        info!(
            documents = total,
            inserted,
            skipped,
            rows = index.len(),
            "Index build complete"
        );
        Ok(inserted)
    }
}
