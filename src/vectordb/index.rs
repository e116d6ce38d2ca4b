use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use super::error::VectorDbError;
use crate::corpus::{CorpusStore, Document};

/// One query result: the matched document and its inner-product score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub position: usize,
    pub score: f32,
    pub document: Document,
}

/// Flat, exact inner-product index with position-aligned documents.
///
/// `insert` takes `&mut self` and `query` takes `&self`, so a built index can
/// be shared behind an `Arc` and queried concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorIndex {
    dim: usize,
    vectors: Vec<f32>,
    corpus: CorpusStore,
    embedder_mode: Option<String>,
}

impl VectorIndex {
    pub fn new(dim: usize) -> Result<Self, VectorDbError> {
        if dim == 0 {
            return Err(VectorDbError::ZeroDimension);
        }
        Ok(Self {
            dim,
            vectors: Vec::new(),
            corpus: CorpusStore::new(),
            embedder_mode: None,
        })
    }

    /// Reassembles an index from already-validated parts.
    pub(crate) fn from_parts(
        dim: usize,
        vectors: Vec<f32>,
        corpus: CorpusStore,
        embedder_mode: Option<String>,
    ) -> Self {
        debug_assert_eq!(vectors.len(), dim * corpus.len());
        Self {
            dim,
            vectors,
            corpus,
            embedder_mode,
        }
    }

    /// Backend (`"stub"` or `"model"`) whose vectors fill this index, if known.
    ///
    /// Indexes built by hand through [`insert`](Self::insert) carry no mode.
    pub fn embedder_mode(&self) -> Option<&str> {
        self.embedder_mode.as_deref()
    }

    /// Fails if the index already holds vectors from a different backend.
    pub fn check_embedder_mode(&self, mode: &str) -> Result<(), VectorDbError> {
        match &self.embedder_mode {
            Some(existing) if existing != mode => Err(VectorDbError::EmbedderMismatch {
                index: existing.clone(),
                embedder: mode.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Records the backend whose vectors fill this index.
    pub fn bind_embedder_mode(&mut self, mode: &str) -> Result<(), VectorDbError> {
        self.check_embedder_mode(mode)?;
        if self.embedder_mode.is_none() {
            self.embedder_mode = Some(mode.to_string());
        }
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    pub(crate) fn raw_vectors(&self) -> &[f32] {
        &self.vectors
    }

    /// Row `position` of the vector buffer.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        let start = position.checked_mul(self.dim)?;
        self.vectors.get(start..start + self.dim)
    }

    fn check(&self, vector: &[f32]) -> Result<(), VectorDbError> {
        if vector.len() != self.dim {
            return Err(VectorDbError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }
        if vector.iter().any(|x| !x.is_finite()) {
            return Err(VectorDbError::NonFiniteVector);
        }
        Ok(())
    }

    /// Appends a vector and its document; returns the new position.
    ///
    /// Validation happens before either buffer is touched.
    pub fn insert(&mut self, vector: &[f32], document: Document) -> Result<usize, VectorDbError> {
        self.check(vector)?;
        self.vectors.extend_from_slice(vector);
        Ok(self.corpus.push(document))
    }

    /// Top-`k` rows by inner product, best first; ties go to the earlier row.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<SearchHit>, VectorDbError> {
        self.check(vector)?;

        let k = k.min(self.len());
        if k == 0 {
            return Ok(vec![]);
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .chunks_exact(self.dim)
            .map(|row| row.iter().zip(vector).map(|(a, b)| a * b).sum::<f32>())
            .enumerate()
            .collect();

        let rank = |a: &(usize, f32), b: &(usize, f32)| -> Ordering {
            b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
        };

        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, rank);
            scored.truncate(k);
        }
        scored.sort_unstable_by(rank);

        debug!(
            rows = self.len(),
            k,
            top_score = scored.first().map(|&(_, s)| s),
            "Index query"
        );

        Ok(scored
            .into_iter()
            .filter_map(|(position, score)| {
                self.corpus.get(position).map(|doc| SearchHit {
                    position,
                    score,
                    document: doc.clone(),
                })
            })
            .collect())
    }
}
