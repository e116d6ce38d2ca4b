use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::bert::SentenceBert;
use super::config::EmbedderConfig;
use super::device::select_device;
use super::error::EmbeddingError;
use super::utils::load_tokenizer_with_truncation;
use super::{TextEmbedder, l2_normalize};
use crate::constants::{MAX_TEXT_CHARS, truncate_chars};

enum EmbedderBackend {
    Model {
        model: SentenceBert,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence embedder for semantic search (supports stub mode).
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!(
                embedding_dim = config.embedding_dim,
                "Sentence embedder running in STUB mode"
            );
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for sentence embedder");

        let tokenizer = load_tokenizer_with_truncation(&config.model_dir, config.max_seq_len)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        let model = SentenceBert::load(&config.model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;

        if model.hidden_size() != config.embedding_dim {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) does not match model hidden_size ({})",
                    config.embedding_dim,
                    model.hidden_size()
                ),
            });
        }

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Sentence model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
        })
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    /// Strips surrounding whitespace, then applies the length limit.
    fn prepare(text: &str) -> Result<&str, EmbeddingError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        Ok(truncate_chars(text, MAX_TEXT_CHARS))
    }

    fn embed_with_model(
        &self,
        texts: &[&str],
        model: &SentenceBert,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let mut ids = Vec::with_capacity(encodings.len());
        let mut type_ids = Vec::with_capacity(encodings.len());
        let mut masks = Vec::with_capacity(encodings.len());
        for enc in &encodings {
            ids.push(Tensor::new(enc.get_ids(), device)?);
            type_ids.push(Tensor::new(enc.get_type_ids(), device)?);
            masks.push(Tensor::new(enc.get_attention_mask(), device)?);
        }

        let input_ids = Tensor::stack(&ids, 0)?;
        let token_type_ids = Tensor::stack(&type_ids, 0)?;
        let attention_mask = Tensor::stack(&masks, 0)?;

        debug!(
            batch = texts.len(),
            seq_len = input_ids.dim(1)?,
            "Running sentence encoder"
        );

        let pooled = model
            .forward_pooled(&input_ids, &token_type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let mut rows = pooled.to_vec2::<f32>()?;
        for row in &mut rows {
            l2_normalize(row);
        }
        Ok(rows)
    }

    /// Deterministic pseudo-embedding seeded from the BLAKE3 hash of `text`.
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let mut reader = blake3::Hasher::new()
            .update(text.as_bytes())
            .finalize_xof();

        let mut bytes = vec![0u8; self.config.embedding_dim * 4];
        reader.fill(&mut bytes);

        let mut embedding: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| {
                let v = u32::from_le_bytes([c[0], c[1], c[2], c[3]]);
                (v as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect();

        l2_normalize(&mut embedding);
        embedding
    }
}

impl TextEmbedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut rows = self.embed_batch(&[text])?;
        rows.pop().ok_or_else(|| EmbeddingError::InferenceFailed {
            reason: "encoder returned no rows".to_string(),
        })
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let prepared = texts
            .iter()
            .map(|t| Self::prepare(t))
            .collect::<Result<Vec<_>, _>>()?;

        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(&prepared, model, tokenizer, device),
            EmbedderBackend::Stub => Ok(prepared.iter().map(|t| self.embed_stub(t)).collect()),
        }
    }

    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    fn mode(&self) -> &'static str {
        if self.is_stub() { "stub" } else { "model" }
    }
}
