//! Error types for grid sources and configuration
//!
//! A [`FetchError`] never reaches the user: [`load_tree`](crate::load_tree)
//! logs it and falls back to the default tree.

use std::path::PathBuf;

/// Grid could not be obtained
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No API key configured for the spreadsheet backend
    #[error("spreadsheet api key is not configured")]
    MissingApiKey,

    /// Request could not be sent or the body could not be read
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("spreadsheet backend returned {status}")]
    Status { status: reqwest::StatusCode },

    /// IO error reading a local grid file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Body is not a grid
    #[error("malformed grid: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Configuration could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An override has an unusable value
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
