use std::path::PathBuf;
use thiserror::Error;

/// Rejected `NEWSPROBE_*` settings or artifact paths.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NEWSPROBE_PORT '{value}' is out of range (1-65535)")]
    InvalidPort { value: String },

    #[error("NEWSPROBE_PORT '{value}' is not a number: {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("NEWSPROBE_BIND_ADDR '{value}' is not an IP address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Decision threshold outside `[0, 1]` or unparseable.
    #[error("threshold '{value}' must lie in [0.0, 1.0]")]
    InvalidThreshold { value: String },

    #[error("configured path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    #[error("expected an artifact file at {path}")]
    NotAFile { path: PathBuf },

    #[error("expected a directory at {path}")]
    NotADirectory { path: PathBuf },
}
