//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod harness;

use std::path::{Path, PathBuf};

use newsprobe::config::Config;

/// Small JSONL feed covering the shapes ingestion must accept.
pub const ARTICLES_JSONL: &str = r#"{"title":"Health agency update","text":"Vaccine trials continue with improved results.","url":"https://example.org/health"}
{"title":"Miracle cure scam exposed","text":"Celebrity product pulled after complaints.","url":"https://example.org/scam"}

{"title":"Policy announcement","text":"The government confirmed a new policy today.","url":"https://example.org/policy"}
{"text":"Untitled wire copy about markets.","url":"https://example.org/wire"}
"#;

/// Writes the article feed under `dir` and returns a config pointing into `dir`.
pub fn workspace(dir: &Path) -> Config {
    let data_dir = dir.join("data");
    std::fs::create_dir_all(&data_dir).expect("create data dir");
    std::fs::write(data_dir.join("articles.json"), ARTICLES_JSONL).expect("write articles");

    Config {
        data_dir,
        classifier_path: dir.join("models").join("baseline.rkyv"),
        index_dir: dir.join("models").join("vector_index"),
        embedder_path: None,
        ..Default::default()
    }
}

pub fn models_dir(config: &Config) -> PathBuf {
    config.index_dir.parent().map(Path::to_path_buf).unwrap_or_default()
}
