//! Semantic text encoding.
//!
//! [`TextEmbedder`] is the seam the index builder and the scoring pipeline
//! depend on. [`SentenceEmbedder`] implements it with either a BERT-family
//! sentence model (mean pooled, unit norm) or a deterministic stub.

/// Sentence-level BERT encoder.
pub mod bert;
/// Embedder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// [`SentenceEmbedder`] and its backends.
pub mod sentence;
/// Tokenizer loading helpers.
pub mod utils;


pub use config::EmbedderConfig;
pub use error::EmbeddingError;
pub use sentence::SentenceEmbedder;

/// Maps text to fixed-dimension, L2-normalized vectors.
///
/// Implementations must be deterministic for identical input and always
/// return vectors of length [`embedding_dim`](TextEmbedder::embedding_dim).
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn embedding_dim(&self) -> usize;

    /// Short label for readiness reporting (`"model"` or `"stub"`).
    fn mode(&self) -> &'static str;
}

/// Scales `v` to unit L2 norm in place (zero vectors are left untouched).
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
