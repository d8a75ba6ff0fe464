//! Snapshot persistence for the ticket ledger
//!
//! The ledger mirrors its whole contents to a [`TicketStore`] after every
//! append. Stores never append incrementally; each save replaces the
//! previous snapshot.

use crate::error::StoreError;
use crate::ticket::Ticket;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Fixed logical name of the persisted snapshot
pub const STORAGE_KEY: &str = "salon_tickets";

/// Durable mirror of the ledger
pub trait TicketStore: std::fmt::Debug + Send {
    /// Load the stored snapshot, oldest ticket first
    ///
    /// # Errors
    /// Returns error if the snapshot exists but cannot be read or decoded
    fn load(&self) -> Result<Vec<Ticket>, StoreError>;

    /// Replace the stored snapshot with `tickets`
    ///
    /// # Errors
    /// Returns error if the snapshot cannot be written
    fn save(&self, tickets: &[Ticket]) -> Result<(), StoreError>;
}

/// Snapshot stored as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at an explicit file path
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/salon_tickets.json`
    #[inline]
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    /// Snapshot file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TicketStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Ticket>, StoreError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io_error(&self.path, e)),
        };
        serde_json::from_slice(&raw).map_err(|e| StoreError::serde_error(&self.path, e))
    }

    fn save(&self, tickets: &[Ticket]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io_error(&dir, e))?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(&dir).map_err(|e| StoreError::io_error(&dir, e))?;
        serde_json::to_writer(&mut tmp, tickets)
            .map_err(|e| StoreError::serde_error(&self.path, e))?;
        tmp.flush().map_err(|e| StoreError::io_error(&self.path, e))?;
        tmp.persist(&self.path).map_err(|e| StoreError::Persist {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(())
    }
}

/// In-memory store, shareable between a ledger and an observer
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    snapshot: Vec<Ticket>,
    saves: usize,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store pre-filled with a snapshot
    #[must_use]
    pub fn with_snapshot(tickets: Vec<Ticket>) -> Self {
        let store = Self::new();
        store.inner.lock().snapshot = tickets;
        store
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> Vec<Ticket> {
        self.inner.lock().snapshot.clone()
    }

    /// Number of completed saves
    #[must_use]
    pub fn saves(&self) -> usize {
        self.inner.lock().saves
    }
}

impl TicketStore for MemoryStore {
    fn load(&self) -> Result<Vec<Ticket>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, tickets: &[Ticket]) -> Result<(), StoreError> {
        let mut state = self.inner.lock();
        state.snapshot = tickets.to_vec();
        state.saves += 1;
        Ok(())
    }
}
