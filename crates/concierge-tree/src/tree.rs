//! Read-only tree index
//!
//! Provides [`Tree`]: an ordered root list plus an id → [`Node`] mapping.
//! Built once by the parser and never mutated afterward.

use crate::node::{join_id, Node};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parsed menu hierarchy
///
/// Nodes are kept in creation order, so iteration follows the grid's
/// row order. Lookups are O(1) by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Top-level ids in first-seen order
    roots: Vec<String>,

    /// All nodes, including orphans
    nodes: IndexMap<String, Node>,
}

impl Tree {
    /// Create empty tree
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get root ids in order
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Lookup node by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check if id exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Lookup node addressed by a label path
    #[must_use]
    pub fn get_by_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        self.get(&join_id(path))
    }

    /// Resolve root ids to nodes, skipping unknown ids
    pub fn root_nodes(&self) -> impl Iterator<Item = &Node> {
        self.roots.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Resolve a node's children, skipping unknown ids
    ///
    /// Returns an empty iterator when `id` itself does not resolve.
    pub fn children_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.nodes.get(child))
    }

    /// Iterate all nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes that are neither roots nor linked under an existing parent
    pub fn orphans(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|node| !self.is_linked(node))
    }

    fn is_linked(&self, node: &Node) -> bool {
        if node.level == 0 {
            return self.roots.contains(&node.id);
        }
        node.parent
            .as_deref()
            .and_then(|parent| self.nodes.get(parent))
            .is_some_and(|parent| parent.children.contains(&node.id))
    }

    /// Total node count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree has no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if tree has at least one root
    ///
    /// A tree without roots gives an empty top menu and should be replaced
    /// by a fallback.
    #[inline]
    #[must_use]
    pub fn has_roots(&self) -> bool {
        !self.roots.is_empty()
    }

    /// Render an indented outline, one node per line
    #[must_use]
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for root in self.root_nodes() {
            self.write_outline(root, &mut out);
        }
        out
    }

    fn write_outline(&self, node: &Node, out: &mut String) {
        for _ in 0..node.level {
            out.push_str("  ");
        }
        out.push_str(&node.value);
        out.push('\n');
        for child in self.children_of(&node.id) {
            self.write_outline(child, out);
        }
    }

    pub(crate) fn insert_if_absent(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub(crate) fn push_root(&mut self, id: &str) {
        if !self.roots.iter().any(|r| r == id) {
            self.roots.push(id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_tree() -> Tree {
        let mut tree = Tree::new();
        tree.insert_if_absent(Node::new("A", "A", 0, 0, None));
        tree.push_root("A");
        tree.insert_if_absent(Node::new("A.1", "1", 1, 1, Some("A".into())));
        tree.node_mut("A").unwrap().link_child("A.1");
        tree.node_mut("A").unwrap().link_child("A.ghost");
        tree.insert_if_absent(Node::new(".x", "x", 1, 2, None));
        tree
    }

    #[test]
    fn lookup_by_id_and_path() {
        let tree = small_tree();
        assert_eq!(tree.get("A.1").unwrap().value, "1");
        assert_eq!(tree.get_by_path(&["A", "1"]).unwrap().id, "A.1");
        assert!(tree.get("B").is_none());
    }

    #[test]
    fn children_skip_unknown_ids() {
        let tree = small_tree();
        let ids: Vec<_> = tree.children_of("A").map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A.1"]);
        assert_eq!(tree.children_of("missing").count(), 0);
    }

    #[test]
    fn orphans_are_unlinked_nodes() {
        let tree = small_tree();
        let orphans: Vec<_> = tree.orphans().map(|n| n.id.as_str()).collect();
        assert_eq!(orphans, vec![".x"]);
    }

    #[test]
    fn insert_keeps_first_occurrence() {
        let mut tree = small_tree();
        assert!(!tree.insert_if_absent(Node::new("A", "changed", 0, 9, None)));
        assert_eq!(tree.get("A").unwrap().source_index, 0);
        assert_eq!(tree.get("A").unwrap().value, "A");
    }

    #[test]
    fn outline_indents_by_level() {
        let tree = small_tree();
        assert_eq!(tree.outline(), "A\n  1\n");
    }
}
