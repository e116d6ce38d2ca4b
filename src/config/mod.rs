//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `NEWSPROBE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{DEFAULT_FAKE_THRESHOLD, DEFAULT_TOP_K};

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `NEWSPROBE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding ingestion and training inputs. Default: `./data`.
    pub data_dir: PathBuf,

    /// Path to the persisted classifier artifact. Default: `./models/baseline.rkyv`.
    pub classifier_path: PathBuf,

    /// Directory holding the persisted vector index. Default: `./models/vector_index`.
    pub index_dir: PathBuf,

    /// Sentence-embedding model directory (`config.json`, `model.safetensors`,
    /// `tokenizer.json`). `None` runs the embedder in stub mode.
    pub embedder_path: Option<PathBuf>,

    /// Evidence documents returned per analysis. Default: `5`.
    pub top_k: usize,

    /// Fake-probability decision threshold. Default: `0.5`.
    pub threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            data_dir: PathBuf::from("./data"),
            classifier_path: PathBuf::from("./models/baseline.rkyv"),
            index_dir: PathBuf::from("./models/vector_index"),
            embedder_path: None,
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_FAKE_THRESHOLD,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "NEWSPROBE_PORT";
    const ENV_BIND_ADDR: &'static str = "NEWSPROBE_BIND_ADDR";
    const ENV_DATA_DIR: &'static str = "NEWSPROBE_DATA_DIR";
    const ENV_CLASSIFIER_PATH: &'static str = "NEWSPROBE_CLASSIFIER_PATH";
    const ENV_INDEX_DIR: &'static str = "NEWSPROBE_INDEX_DIR";
    const ENV_EMBEDDER_PATH: &'static str = "NEWSPROBE_EMBEDDER_PATH";
    const ENV_TOP_K: &'static str = "NEWSPROBE_TOP_K";
    const ENV_THRESHOLD: &'static str = "NEWSPROBE_THRESHOLD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let data_dir = Self::parse_path_from_env(Self::ENV_DATA_DIR, defaults.data_dir);
        let classifier_path =
            Self::parse_path_from_env(Self::ENV_CLASSIFIER_PATH, defaults.classifier_path);
        let index_dir = Self::parse_path_from_env(Self::ENV_INDEX_DIR, defaults.index_dir);
        let embedder_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH);
        let top_k = Self::parse_usize_from_env(Self::ENV_TOP_K, defaults.top_k);
        let threshold = Self::parse_threshold_from_env(defaults.threshold)?;

        Ok(Self {
            port,
            bind_addr,
            data_dir,
            classifier_path,
            index_dir,
            embedder_path,
            top_k,
            threshold,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.data_dir.clone(),
            });
        }

        if self.index_dir.exists() && !self.index_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.index_dir.clone(),
            });
        }

        if self.classifier_path.exists() && !self.classifier_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.classifier_path.clone(),
            });
        }

        if let Some(ref path) = self.embedder_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold.to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Default location of the JSONL article feed.
    pub fn articles_path(&self) -> PathBuf {
        self.data_dir.join("articles.json")
    }

    /// Default location of the labeled training CSV.
    pub fn training_path(&self) -> PathBuf {
        self.data_dir.join("small_labeled.csv")
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => {
                let threshold: f32 = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidThreshold {
                        value: value.clone(),
                    })?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(ConfigError::InvalidThreshold { value });
                }
                Ok(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
