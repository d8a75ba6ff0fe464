//! Grid-to-tree parser
//!
//! Converts a sparse, indentation-encoded grid into a [`Tree`].
//!
//! Each row contributes at most one node: the first cell holding
//! non-whitespace text. Its column is the node's level. Rows never repeat
//! their ancestors; the ancestry is rebuilt from a running label path that
//! persists across rows:
//!
//! ```text
//! row 0: | A |   |      path = [A]       id = A
//! row 1: |   | 1 |      path = [A, 1]    id = A.1
//! row 2: |   | 2 |      path = [A, 2]    id = A.2
//! row 3: | B |   |      path = [B]       id = B
//! ```
//!
//! Parsing never fails. Malformed rows are absorbed and reported as
//! [`ParseAnomaly`] values.

use crate::node::{join_id, Node};
use crate::tree::Tree;

/// One grid row: possibly-empty cells, left to right
pub type Row = Vec<String>;

/// Ordered sequence of rows
pub type Grid = Vec<Row>;

/// Non-fatal irregularity absorbed while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAnomaly {
    /// Row with no non-blank cell; contributed nothing
    BlankRow {
        /// Grid row
        row: usize,
    },

    /// Row whose computed id already existed; first occurrence kept
    DuplicateRow {
        /// Grid row
        row: usize,
        /// Computed id
        id: String,
    },

    /// Row deeper than any label seen so far at some shallower level
    ///
    /// The missing ancestor labels are empty, so the id carries empty
    /// segments (e.g. `..v`).
    MissingAncestor {
        /// Grid row
        row: usize,
        /// Computed id
        id: String,
    },

    /// Node whose parent id does not resolve; kept but not linked
    Orphaned {
        /// Grid row
        row: usize,
        /// Computed id
        id: String,
        /// Unresolved parent id (`None` when the parent id was empty)
        parent: Option<String>,
    },
}

impl std::fmt::Display for ParseAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankRow { row } => write!(f, "row {row}: blank"),
            Self::DuplicateRow { row, id } => write!(f, "row {row}: duplicate id {id:?}, first kept"),
            Self::MissingAncestor { row, id } => {
                write!(f, "row {row}: missing ancestor labels in {id:?}")
            }
            Self::Orphaned { row, id, parent } => match parent {
                Some(parent) => write!(f, "row {row}: {id:?} has unknown parent {parent:?}"),
                None => write!(f, "row {row}: {id:?} has no parent row"),
            },
        }
    }
}

/// Tree plus the anomalies absorbed while building it
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Parsed tree
    pub tree: Tree,

    /// Absorbed anomalies in row order
    pub anomalies: Vec<ParseAnomaly>,
}

impl ParseReport {
    /// Check if the grid parsed without anomalies
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Parse a grid into a tree
///
/// Pure and deterministic; never fails.
#[must_use]
pub fn parse<R: AsRef<[S]>, S: AsRef<str>>(grid: &[R]) -> Tree {
    parse_with_report(grid).tree
}

/// Parse a grid, keeping the list of absorbed anomalies
#[must_use]
pub fn parse_with_report<R: AsRef<[S]>, S: AsRef<str>>(grid: &[R]) -> ParseReport {
    let mut tree = Tree::new();
    let mut anomalies = Vec::new();
    let mut current_path: Vec<String> = Vec::new();

    for (row_index, row) in grid.iter().enumerate() {
        let Some((level, value)) = first_label(row.as_ref()) else {
            anomalies.push(ParseAnomaly::BlankRow { row: row_index });
            continue;
        };

        let gap = level > current_path.len();
        current_path.truncate(level);
        current_path.resize(level, String::new());
        current_path.push(value.to_string());

        let id = join_id(&current_path);
        let parent_id = join_id(&current_path[..level]);
        let parent = (!parent_id.is_empty()).then(|| parent_id.clone());

        if gap {
            anomalies.push(ParseAnomaly::MissingAncestor {
                row: row_index,
                id: id.clone(),
            });
        }

        let created = tree.insert_if_absent(Node::new(
            id.clone(),
            value,
            level,
            row_index,
            parent.clone(),
        ));
        if !created {
            anomalies.push(ParseAnomaly::DuplicateRow {
                row: row_index,
                id: id.clone(),
            });
        }

        if level == 0 {
            tree.push_root(&id);
            continue;
        }

        let linked = match parent.as_deref().and_then(|p| tree.node_mut(p)) {
            Some(parent_node) => {
                parent_node.link_child(&id);
                true
            }
            None => false,
        };
        if !linked {
            anomalies.push(ParseAnomaly::Orphaned {
                row: row_index,
                id,
                parent,
            });
        }
    }

    for anomaly in &anomalies {
        tracing::debug!(?anomaly, "absorbed grid anomaly");
    }

    ParseReport { tree, anomalies }
}

/// Find the first cell with non-whitespace content
fn first_label<S: AsRef<str>>(row: &[S]) -> Option<(usize, &str)> {
    row.iter()
        .map(AsRef::as_ref)
        .enumerate()
        .find(|(_, cell)| !cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| (*c).to_string()).collect())
            .collect()
    }

    #[test]
    fn builds_roots_and_children() {
        let tree = parse(&grid(&[&["A"], &["A", "1"], &["B"]]));

        assert_eq!(tree.roots(), &["A", "B"]);
        // "A" in column 0 wins for the second row too; "1" is ignored
        assert_eq!(tree.get("A").unwrap().children, Vec::<String>::new());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn indentation_encodes_depth() {
        let tree = parse(&grid(&[&["A"], &["", "1"], &["B"]]));

        assert_eq!(tree.roots(), &["A", "B"]);
        assert_eq!(tree.get("A").unwrap().children, vec!["A.1"]);
        let child = tree.get("A.1").unwrap();
        assert_eq!(child.level, 1);
        assert_eq!(child.value, "1");
        assert_eq!(child.parent.as_deref(), Some("A"));
        assert_eq!(child.source_index, 1);
    }

    #[test]
    fn ancestry_is_inherited_from_previous_rows() {
        let tree = parse(&grid(&[
            &["A"],
            &["", "1"],
            &["", "", "x"],
            &["", "", "y"],
            &["", "2"],
            &["", "", "x"],
        ]));

        assert_eq!(tree.get("A").unwrap().children, vec!["A.1", "A.2"]);
        assert_eq!(tree.get("A.1").unwrap().children, vec!["A.1.x", "A.1.y"]);
        assert_eq!(tree.get("A.2").unwrap().children, vec!["A.2.x"]);
        assert_eq!(tree.get("A.2.x").unwrap().level, 2);
    }

    #[test]
    fn only_first_cell_counts() {
        let tree = parse(&grid(&[&["", "  ", "X", "ignored"]]));
        let node = tree.get("..X");
        assert!(node.is_some());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn duplicate_rows_keep_first_occurrence() {
        let report = parse_with_report(&grid(&[
            &["A"],
            &["", "1"],
            &["B"],
            &["A"],
            &["", "1"],
            &["", "2"],
        ]));
        let tree = &report.tree;

        assert_eq!(tree.roots(), &["A", "B"]);
        assert_eq!(tree.get("A").unwrap().source_index, 0);
        assert_eq!(tree.get("A.1").unwrap().source_index, 1);
        assert_eq!(tree.get("A").unwrap().children, vec!["A.1", "A.2"]);
        assert!(report
            .anomalies
            .contains(&ParseAnomaly::DuplicateRow { row: 3, id: "A".into() }));
    }

    #[test]
    fn blank_rows_leave_path_untouched() {
        let tree = parse(&grid(&[&["A"], &["", " "], &[], &["", "1"]]));
        assert_eq!(tree.get("A").unwrap().children, vec!["A.1"]);
    }

    #[test]
    fn labels_keep_surrounding_whitespace() {
        let tree = parse(&grid(&[&[" A "], &["", "1"]]));
        assert_eq!(tree.roots(), &[" A "]);
        assert!(tree.get(" A .1").is_some());
    }

    #[test]
    fn deep_row_before_ancestors_is_orphaned() {
        let report = parse_with_report(&grid(&[&["", "", "v"], &["A"]]));
        let tree = &report.tree;

        let node = tree.get("..v").unwrap();
        assert_eq!(node.level, 2);
        assert_eq!(node.parent.as_deref(), Some("."));
        assert_eq!(tree.roots(), &["A"]);
        assert_eq!(tree.orphans().count(), 1);
        assert!(report.anomalies.contains(&ParseAnomaly::Orphaned {
            row: 0,
            id: "..v".into(),
            parent: Some(".".into()),
        }));
    }

    #[test]
    fn level_one_row_without_root_has_no_parent() {
        let report = parse_with_report(&grid(&[&["", "1"]]));
        let node = report.tree.get(".1").unwrap();

        assert_eq!(node.parent, None);
        assert!(!report.tree.has_roots());
        assert!(matches!(
            report.anomalies.as_slice(),
            [ParseAnomaly::MissingAncestor { .. }, ParseAnomaly::Orphaned { parent: None, .. }]
        ));
    }

    #[test]
    fn empty_grid_gives_empty_tree() {
        let report = parse_with_report::<Vec<String>, String>(&[]);
        assert!(report.tree.is_empty());
        assert!(report.is_clean());
    }
}
