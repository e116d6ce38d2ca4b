//! Fake-news text classifier: TF-IDF features into a logistic model.
//!
//! - [`train`] fits a [`Classifier`] from labeled rows (offline).
//! - [`Classifier::predict`] scores a single text (online).
//! - [`artifact`] persists the fitted model as one rkyv file.
//!
//! A loaded classifier is immutable; share it behind an `Arc`.

pub mod artifact;
pub mod dataset;
pub mod error;
pub mod model;
pub mod train;

#[cfg(test)]
mod tests;

pub use artifact::{ARTIFACT_FORMAT_VERSION, ArchivedClassifierArtifact, ClassifierArtifact};
pub use dataset::{LabeledRow, load_or_seed, read_training_csv, seed_dataset, write_training_csv};
pub use error::ClassifierError;
pub use model::{Classification, Classifier, sigmoid};
pub use train::{TrainingConfig, train};
