//! Error types for ticket persistence

use std::path::PathBuf;

/// Errors while loading or saving a ticket snapshot
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error reading or writing the snapshot
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not a valid ticket array
    #[error("malformed snapshot {path}: {source}")]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic replace of the snapshot failed
    #[error("could not replace snapshot {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create decode/encode error for path
    pub fn serde_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serde {
            path: path.into(),
            source,
        }
    }
}
