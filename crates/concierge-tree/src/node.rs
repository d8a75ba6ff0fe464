//! Tree nodes
//!
//! Provides [`Node`], one labeled entry of the menu hierarchy.

use serde::{Deserialize, Serialize};

/// Separator between labels inside a node id
pub const ID_SEPARATOR: char = '.';

/// One entry in the hierarchy
///
/// The `id` is the dot-joined chain of labels from the root down to this
/// node, so it doubles as the node's address. Ids are case- and
/// whitespace-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Dot-joined label chain, unique within a tree
    pub id: String,

    /// Raw label text as authored in the grid cell
    pub value: String,

    /// Zero-based depth (the column the label was found in)
    pub level: usize,

    /// Grid row that first produced this node
    pub source_index: usize,

    /// Child ids in first-seen order
    pub children: Vec<String>,

    /// Parent id, `None` for top-level nodes
    pub parent: Option<String>,
}

impl Node {
    /// Create a node with no children yet
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        value: impl Into<String>,
        level: usize,
        source_index: usize,
        parent: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            level,
            source_index,
            children: Vec::new(),
            parent,
        }
    }

    /// Check if the node has no children
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Check if the node is top-level
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Append a child id unless it is already present
    pub(crate) fn link_child(&mut self, child: &str) {
        if !self.children.iter().any(|c| c == child) {
            self.children.push(child.to_string());
        }
    }
}

/// Join label segments into a node id
#[inline]
#[must_use]
pub fn join_id<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            out.push(ID_SEPARATOR);
        }
        out.push_str(seg.as_ref());
    }
    out
}

/// Split a node id back into its label segments
#[inline]
#[must_use]
pub fn split_id(id: &str) -> Vec<String> {
    id.split(ID_SEPARATOR).map(str::to_string).collect()
}
