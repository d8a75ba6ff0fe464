//! Grid sources
//!
//! A [`GridSource`] supplies the raw grid the menu tree is parsed from.

use crate::config::SheetsConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use concierge_tree::Grid;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supplier of the menu grid
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GridSource: Send + Sync {
    /// Fetch the current grid
    ///
    /// # Errors
    /// Returns error if the grid cannot be obtained or decoded
    async fn fetch_grid(&self) -> Result<Grid, FetchError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Body of a Sheets `values` response; `values` is absent for an empty sheet
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Accepted grid encodings: a Sheets response object or a bare row array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GridDocument {
    Range(ValueRange),
    Rows(Vec<Vec<serde_json::Value>>),
}

/// Decode a JSON grid document
///
/// Non-string cells are rendered as text; `null` becomes an empty cell.
///
/// # Errors
/// Returns error if `body` is neither a `{"values": [...]}` object nor an
/// array of rows
pub fn decode_grid(body: &[u8]) -> Result<Grid, FetchError> {
    let rows = match serde_json::from_slice::<GridDocument>(body)? {
        GridDocument::Range(range) => range.values,
        GridDocument::Rows(rows) => rows,
    };
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Google Sheets `values` endpoint
#[derive(Debug, Clone)]
pub struct SheetsSource {
    client: reqwest::Client,
    config: SheetsConfig,
}

impl SheetsSource {
    /// Create source with its own HTTP client
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: SheetsConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    /// Request URL without the API key
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/{}/values/{}!{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.spreadsheet_id,
            self.config.sheet_name,
            self.config.range
        )
    }
}

#[async_trait]
impl GridSource for SheetsSource {
    async fn fetch_grid(&self) -> Result<Grid, FetchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(FetchError::MissingApiKey)?;

        let response = self
            .client
            .get(self.url())
            .query(&[("key", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.bytes().await?;
        decode_grid(&body)
    }

    fn describe(&self) -> String {
        format!("sheets:{}", self.url())
    }
}

/// Grid stored in a local JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Source reading `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl GridSource for JsonFileSource {
    async fn fetch_grid(&self) -> Result<Grid, FetchError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        decode_grid(&body)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
