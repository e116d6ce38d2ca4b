//! Exact inner-product vector index over the news corpus.
//!
//! Vectors live in one flat row-major buffer; row `i` belongs to the
//! document at position `i` of the embedded [`CorpusStore`](crate::corpus::CorpusStore).
//! Queries are brute-force scans, so results are exact.
//!
//! # Persistence
//!
//! [`VectorIndex::persist`] writes two co-located rkyv artifacts:
//!
//! - `index.rkyv`: dimension, row count, flat vectors and the BLAKE3 digest of
//!   the metadata file
//! - `meta.rkyv`: the documents, in row order
//!
//! [`VectorIndex::load`] refuses any pair that does not agree with itself.

pub mod builder;
pub mod error;
pub mod index;
pub mod persist;


pub use builder::{DEFAULT_BATCH_SIZE, IndexBuilder};
pub use error::VectorDbError;
pub use index::{SearchHit, VectorIndex};
pub use persist::{INDEX_FILE, INDEX_FORMAT_VERSION, META_FILE};
