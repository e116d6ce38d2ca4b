use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::error::FeatureError;
use super::tokenizer::ngrams;
use super::vector::LexicalVector;
use crate::constants::{MAX_TEXT_CHARS, truncate_chars};

/// Term to id mapping plus the IDF weight of every id.
///
/// Ids are dense (`0..len`) and assigned in lexicographic term order.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    idf: Vec<f32>,
    index: HashMap<String, u32>,
}

impl Vocabulary {
    /// Rebuilds a vocabulary from its persisted parts.
    ///
    /// Terms must be unique; `idf` must be parallel to `terms`.
    pub fn from_parts(terms: Vec<String>, idf: Vec<f32>) -> Result<Self, FeatureError> {
        if terms.len() != idf.len() {
            return Err(FeatureError::InvalidVocabulary {
                reason: format!("{} terms but {} idf weights", terms.len(), idf.len()),
            });
        }
        if u32::try_from(terms.len()).is_err() {
            return Err(FeatureError::InvalidVocabulary {
                reason: format!("{} terms exceed the id space", terms.len()),
            });
        }

        let mut index = HashMap::with_capacity(terms.len());
        for (id, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), id as u32).is_some() {
                return Err(FeatureError::InvalidVocabulary {
                    reason: format!("duplicate term {term:?}"),
                });
            }
        }

        Ok(Self { terms, idf, index })
    }

    /// Fits a vocabulary on `documents`, keeping at most `max_features` terms.
    ///
    /// Terms are ranked by total corpus frequency (ties by term) and IDF is
    /// smoothed: `ln((1 + n) / (1 + df)) + 1`. Training rows are counted in
    /// full; only [`encode`](Self::encode) applies the length limit.
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Self {
        let mut corpus_freq: HashMap<String, u64> = HashMap::new();
        let mut doc_freq: HashMap<String, u64> = HashMap::new();

        for doc in documents {
            let terms = ngrams(doc.as_ref());

            let mut seen: HashSet<&str> = HashSet::with_capacity(terms.len());
            for term in &terms {
                *corpus_freq.entry(term.clone()).or_default() += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(String, u64)> = corpus_freq.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let n = documents.len() as f64;
        let idf: Vec<f32> = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                (((1.0 + n) / (1.0 + df)).ln() + 1.0) as f32
            })
            .collect();

        debug!(
            documents = documents.len(),
            vocabulary = terms.len(),
            max_features,
            "Fitted vocabulary"
        );

        let index = terms
            .iter()
            .enumerate()
            .map(|(id, term)| (term.clone(), id as u32))
            .collect();

        Self { terms, idf, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn id(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// Encodes `text` as an L2-normalized TF-IDF row.
    ///
    /// Surrounding whitespace is stripped, then text past the length limit is
    /// ignored. Whitespace-only input is an error; input whose terms are all
    /// unknown yields an empty vector.
    pub fn encode(&self, text: &str) -> Result<LexicalVector, FeatureError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FeatureError::EmptyInput);
        }
        let text = truncate_chars(text, MAX_TEXT_CHARS);

        let mut counts: HashMap<u32, f32> = HashMap::new();
        for term in ngrams(text) {
            if let Some(id) = self.id(&term) {
                *counts.entry(id).or_default() += 1.0;
            }
        }

        let mut row = LexicalVector::from_entries(
            counts
                .into_iter()
                .map(|(id, tf)| (id, tf * self.idf[id as usize]))
                .collect(),
        );
        row.normalize();

        Ok(row)
    }
}
