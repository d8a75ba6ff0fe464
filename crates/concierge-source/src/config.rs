//! Concierge configuration
//!
//! Loaded from an optional TOML file, then overridden from the environment.
//! Every section and field has a default, so an empty file is a valid config.

use crate::error::ConfigError;
use concierge_core::{Pacing, Prompts};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Spreadsheet holding the default menu
pub const DEFAULT_SPREADSHEET_ID: &str = "1Wl0Za3-lkHX7bkO4T7VeVf3-qRw_SUQJnFUUjlDazmQ";

/// Sheets `values` endpoint base
pub const DEFAULT_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Environment variable holding the Sheets API key
pub const ENV_API_KEY: &str = "CONCIERGE_SHEETS_API_KEY";
/// Environment variable overriding the spreadsheet id
pub const ENV_SPREADSHEET_ID: &str = "CONCIERGE_SPREADSHEET_ID";
/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "CONCIERGE_DATA_DIR";
/// Environment variable overriding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "CONCIERGE_SHEETS_TIMEOUT_SECS";

/// Google Sheets source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// API key; fetching is skipped without one
    pub api_key: Option<String>,
    /// Spreadsheet id
    pub spreadsheet_id: String,
    /// Sheet (tab) name
    pub sheet_name: String,
    /// A1-notation range
    pub range: String,
    /// Endpoint base URL
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SheetsConfig {
    /// Request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set API key
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set endpoint base URL
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            sheet_name: "Sheet1".to_string(),
            range: "A1:F100".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Ticket storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the ticket snapshot
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".concierge"),
        }
    }
}

/// Full concierge configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConciergeConfig {
    /// Menu source
    pub sheets: SheetsConfig,
    /// Ticket storage
    pub storage: StorageConfig,
    /// Reply delays
    pub pacing: Pacing,
    /// Bot texts
    pub prompts: Prompts,
}

impl ConciergeConfig {
    /// Load from `path` (if given) and apply process environment overrides
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed, or an override
    /// is malformed
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid config TOML
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config file loaded");
        Ok(config)
    }

    /// Apply overrides read through `get_env`
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a non-numeric timeout
    pub fn with_env_overrides<F>(mut self, get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get_env(key).filter(|value| !value.is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.sheets.api_key = Some(key);
        }
        if let Some(id) = get(ENV_SPREADSHEET_ID) {
            self.sheets.spreadsheet_id = id;
        }
        if let Some(dir) = get(ENV_DATA_DIR) {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.sheets.timeout_secs =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_TIMEOUT_SECS.to_string(),
                        value: raw.clone(),
                    })?;
        }
        Ok(self)
    }

    /// Set data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = dir.into();
        self
    }

    /// Set reply delays
    #[inline]
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }
}
