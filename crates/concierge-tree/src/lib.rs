//! Concierge Tree
//!
//! Turns an indentation-encoded spreadsheet grid into a navigable menu tree.
//!
//! # Overview
//!
//! - **parse**: sparse grid → [`Tree`], one node per row
//! - **Tree**: read-only index (ordered roots, id → [`Node`])
//! - **default_tree**: fallback menu for when no grid is available
//!
//! # Example
//!
//! ```rust
//! use concierge_tree::parse;
//!
//! let grid = vec![
//!     vec!["Booking".to_string()],
//!     vec![String::new(), "Cancel".to_string()],
//!     vec!["Payment".to_string()],
//! ];
//! let tree = parse(&grid);
//!
//! assert_eq!(tree.roots(), &["Booking", "Payment"]);
//! assert_eq!(tree.get("Booking.Cancel").unwrap().level, 1);
//! ```

#![warn(missing_docs)]

pub mod defaults;
pub mod node;
pub mod parser;
pub mod tree;

// Re-exports
pub use defaults::{default_grid, default_tree};
pub use node::{join_id, split_id, Node, ID_SEPARATOR};
pub use parser::{parse, parse_with_report, Grid, ParseAnomaly, ParseReport, Row};
pub use tree::Tree;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
