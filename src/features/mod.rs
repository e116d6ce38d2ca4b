//! Lexical feature encoding (TF-IDF over unigrams and bigrams).
//!
//! [`Vocabulary`] is built once by classifier training and is immutable
//! afterwards. [`Vocabulary::encode`] turns free text into a sparse,
//! L2-normalized [`LexicalVector`].

pub mod error;
pub mod tokenizer;
pub mod vector;
pub mod vocabulary;


pub use error::FeatureError;
pub use tokenizer::{ngrams, tokenize};
pub use vector::LexicalVector;
pub use vocabulary::Vocabulary;
