//! Tree loading with fallback
//!
//! The concierge never starts without a menu: any fetch failure, and any
//! grid that parses to a tree without roots, yields the default tree.

use crate::error::FetchError;
use crate::source::GridSource;
use concierge_tree::{default_tree, parse_with_report, Tree};

/// Where a loaded tree came from
#[derive(Debug)]
pub enum TreeOrigin {
    /// Parsed from the source's grid
    Fetched {
        /// Anomalies reported by the parser
        anomalies: usize,
    },
    /// Fetch failed
    FetchFailed(FetchError),
    /// Grid parsed to a tree without roots
    NoRoots,
}

/// Result of [`load_tree_with_origin`]
#[derive(Debug)]
pub struct LoadedTree {
    /// Tree to install
    pub tree: Tree,
    /// How it was obtained
    pub origin: TreeOrigin,
}

impl LoadedTree {
    /// Check if the tree is the built-in default
    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        !matches!(self.origin, TreeOrigin::Fetched { .. })
    }
}

/// Fetch and parse a tree, falling back to the default tree
pub async fn load_tree(source: &dyn GridSource) -> Tree {
    load_tree_with_origin(source).await.tree
}

/// Like [`load_tree`], also reporting where the tree came from
pub async fn load_tree_with_origin(source: &dyn GridSource) -> LoadedTree {
    let described = source.describe();
    let grid = match source.fetch_grid().await {
        Ok(grid) => grid,
        Err(e) => {
            tracing::warn!(source = %described, error = %e, "menu fetch failed, using default menu");
            return LoadedTree {
                tree: default_tree(),
                origin: TreeOrigin::FetchFailed(e),
            };
        }
    };

    let report = parse_with_report(&grid);
    if !report.tree.has_roots() {
        tracing::warn!(source = %described, rows = grid.len(), "menu has no roots, using default menu");
        return LoadedTree {
            tree: default_tree(),
            origin: TreeOrigin::NoRoots,
        };
    }

    tracing::info!(
        source = %described,
        nodes = report.tree.len(),
        roots = report.tree.roots().len(),
        anomalies = report.anomalies.len(),
        "menu loaded"
    );
    LoadedTree {
        origin: TreeOrigin::Fetched {
            anomalies: report.anomalies.len(),
        },
        tree: report.tree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockGridSource;
    use pretty_assertions::assert_eq;

    fn mock_returning(result: fn() -> Result<concierge_tree::Grid, FetchError>) -> MockGridSource {
        let mut source = MockGridSource::new();
        source.expect_describe().return_const("mock".to_string());
        source.expect_fetch_grid().times(1).returning(move || result());
        source
    }

    #[tokio::test]
    async fn fetched_grid_is_parsed() {
        let source = mock_returning(|| {
            Ok(vec![
                vec!["Hours".to_string()],
                vec![String::new(), "Weekdays".to_string()],
            ])
        });

        let loaded = load_tree_with_origin(&source).await;
        assert!(!loaded.is_fallback());
        assert_eq!(loaded.tree.roots(), &["Hours".to_string()]);
        assert!(loaded.tree.contains("Hours.Weekdays"));
    }

    #[tokio::test]
    async fn fetch_error_falls_back_to_default() {
        let source = mock_returning(|| Err(FetchError::MissingApiKey));

        let loaded = load_tree_with_origin(&source).await;
        assert!(matches!(loaded.origin, TreeOrigin::FetchFailed(FetchError::MissingApiKey)));
        assert_eq!(loaded.tree, default_tree());
    }

    #[tokio::test]
    async fn rootless_grid_falls_back_to_default() {
        let source = mock_returning(|| Ok(vec![vec![String::new(), "  ".to_string()], Vec::new()]));

        let loaded = load_tree_with_origin(&source).await;
        assert!(matches!(loaded.origin, TreeOrigin::NoRoots));
        assert_eq!(load_tree(&mock_returning(|| Ok(Vec::new()))).await, default_tree());
    }
}
