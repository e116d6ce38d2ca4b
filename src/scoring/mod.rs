//! Query-time scoring: classification plus semantic evidence retrieval.
//!
//! [`ServingContext`] is built once at startup and owns the loaded
//! classifier, index and embedder. [`ScoringPipeline`] borrows them for a
//! single `analyze` call:
//!
//! 1. the request text is classified (lexical features only)
//! 2. `"{title}. {text}"` is embedded and the index returns the top-k matches
//!
//! Either step failing fails the whole call. There is no verdict synthesis;
//! the verification block is always `not_implemented`.

pub mod context;
pub mod error;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod tests;

pub use context::ServingContext;
pub use error::ScoringError;
pub use pipeline::ScoringPipeline;
pub use types::{AnalysisResult, AnalyzeRequest, Evidence, Verdict, Verification};
