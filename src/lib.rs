//! Newsprobe library crate (used by the CLI binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Offline
//! - [`corpus`]: JSONL ingestion into immutable [`Document`]s
//! - [`classifier::train`]: TF-IDF vocabulary + logistic weights from labeled rows
//! - [`IndexBuilder`]: embeds documents into a [`VectorIndex`]
//!
//! ## Online
//! - [`ServingContext`]: components loaded once per process
//! - [`ScoringPipeline::analyze`]: classification plus evidence retrieval
//! - [`gateway`]: the Axum HTTP surface
//!
//! ## Encoders
//! - [`Vocabulary`], [`LexicalVector`]: lexical features
//! - [`TextEmbedder`], [`SentenceEmbedder`]: semantic features

pub mod classifier;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod features;
pub mod gateway;
pub mod scoring;
pub mod storage;
pub mod vectordb;

pub use classifier::{
    Classification, Classifier, ClassifierError, LabeledRow, TrainingConfig, load_or_seed,
    read_training_csv, seed_dataset, train,
};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use corpus::{CorpusError, CorpusStore, Document, load_jsonl};
pub use embedding::{EmbedderConfig, EmbeddingError, SentenceEmbedder, TextEmbedder};
pub use features::{FeatureError, LexicalVector, Vocabulary};
pub use scoring::{AnalysisResult, AnalyzeRequest, ScoringError, ScoringPipeline, ServingContext};
pub use storage::{StorageError, write_atomic};
pub use vectordb::{IndexBuilder, SearchHit, VectorDbError, VectorIndex};
