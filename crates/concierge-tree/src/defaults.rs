//! Built-in fallback menu
//!
//! Used by callers when the live grid cannot be fetched or yields no roots.

use crate::parser::parse;
use crate::tree::Tree;

/// Rows of the fallback grid, indentation by leading empty cells
const DEFAULT_ROWS: &[&[&str]] = &[
    &["A"],
    &["", "1"],
    &["", "", "①"],
    &["", "", "②"],
    &["", "", "③"],
    &["", "2"],
    &["", "3"],
    &["", "4"],
    &["B"],
    &["", "1"],
    &["", "2"],
    &["C"],
    &["", "1"],
    &["", "2"],
    &["D"],
    &["", "1"],
    &["", "2"],
];

/// Fallback grid as owned rows
#[must_use]
pub fn default_grid() -> Vec<Vec<String>> {
    DEFAULT_ROWS
        .iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect()
}

/// Fallback tree, parsed from [`default_grid`]
#[must_use]
pub fn default_tree() -> Tree {
    parse(DEFAULT_ROWS)
}
