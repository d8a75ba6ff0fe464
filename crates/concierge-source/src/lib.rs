//! Concierge Source
//!
//! Where the menu comes from and how the concierge is configured.
//!
//! A [`GridSource`] yields a raw grid; [`load_tree`] parses it and falls
//! back to the built-in default menu whenever the grid is unavailable or
//! has no roots. [`ConciergeConfig`] collects source, storage, pacing and
//! prompt settings from TOML and the environment.
//!
//! # Example
//!
//! ```rust,no_run
//! use concierge_source::{load_tree, ConciergeConfig, SheetsSource};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConciergeConfig::load(None)?;
//! let source = SheetsSource::new(config.sheets.clone())?;
//! let tree = load_tree(&source).await;
//! assert!(tree.has_roots());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod loader;
pub mod source;

// Re-exports
pub use config::{ConciergeConfig, SheetsConfig, StorageConfig};
pub use error::{ConfigError, FetchError};
pub use loader::{load_tree, load_tree_with_origin, LoadedTree, TreeOrigin};
pub use source::{decode_grid, GridSource, JsonFileSource, SheetsSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
