//! Menu and breadcrumb derivation
//!
//! Pure functions of a [`Tree`] and a label path.

use concierge_tree::{join_id, Node, Tree};
use serde::Serialize;

/// Separator used when a breadcrumb is shown as one line
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuOption {
    /// Node id to pass back on selection
    pub id: String,
    /// Label to display
    pub value: String,
    /// Node depth
    pub level: usize,
    /// Whether selecting drills deeper instead of resolving
    pub has_children: bool,
}

impl From<&Node> for MenuOption {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            value: node.value.clone(),
            level: node.level,
            has_children: !node.is_leaf(),
        }
    }
}

/// Display labels for every prefix of `path`
///
/// Each prefix is resolved as a node id; segments that do not resolve fall
/// back to the raw label.
#[must_use]
pub fn breadcrumb<S: AsRef<str>>(tree: &Tree, path: &[S]) -> Vec<String> {
    (1..=path.len())
        .map(|len| {
            tree.get_by_path(&path[..len]).map_or_else(
                || path[len - 1].as_ref().to_string(),
                |node| node.value.clone(),
            )
        })
        .collect()
}

/// Breadcrumb joined into one line
#[must_use]
pub fn breadcrumb_line<S: AsRef<str>>(tree: &Tree, path: &[S]) -> String {
    breadcrumb(tree, path).join(BREADCRUMB_SEPARATOR)
}

/// Options offered at `path`
///
/// Empty path gives the roots; otherwise the children of the node at
/// `path`. Ids that do not resolve are skipped.
#[must_use]
pub fn menu_options<S: AsRef<str>>(tree: &Tree, path: &[S]) -> Vec<MenuOption> {
    if path.is_empty() {
        return tree.root_nodes().map(MenuOption::from).collect();
    }
    tree.children_of(&join_id(path))
        .map(MenuOption::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_tree::parse;
    use pretty_assertions::assert_eq;

    fn tree() -> Tree {
        parse(&[
            vec!["A"],
            vec!["", "1"],
            vec!["", "", "x"],
            vec!["", "2"],
            vec!["B"],
        ])
    }

    #[test]
    fn breadcrumb_resolves_each_prefix() {
        assert_eq!(breadcrumb(&tree(), &["A", "1"]), vec!["A", "1"]);
        assert_eq!(breadcrumb_line(&tree(), &["A", "1", "x"]), "A > 1 > x");
    }

    #[test]
    fn breadcrumb_falls_back_to_raw_segment() {
        assert_eq!(breadcrumb(&tree(), &["A", "9", "x"]), vec!["A", "9", "x"]);
        assert!(breadcrumb::<&str>(&tree(), &[]).is_empty());
    }

    #[test]
    fn root_options_in_root_order() {
        let ids: Vec<_> = menu_options::<&str>(&tree(), &[])
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn child_options_carry_drill_marker() {
        let options = menu_options(&tree(), &["A"]);
        assert_eq!(
            options,
            vec![
                MenuOption {
                    id: "A.1".into(),
                    value: "1".into(),
                    level: 1,
                    has_children: true
                },
                MenuOption {
                    id: "A.2".into(),
                    value: "2".into(),
                    level: 1,
                    has_children: false
                },
            ]
        );
        assert!(menu_options(&tree(), &["missing"]).is_empty());
    }
}
