//! Navigation state
//!
//! [`NavigationState`] is the only mutable navigation data of a session.
//! It is changed exclusively by the transitions on
//! [`Session`](crate::session::Session).

use crate::form::EmergencyForm;
use serde::{Deserialize, Serialize};

/// View mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Choosing menu options
    #[default]
    Browsing,
    /// Filling in the emergency contact form
    EmergencyForm,
}

/// State machine phase derived from path and mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase<'a> {
    /// Empty path, browsing the top menu
    AtRoot,
    /// Non-empty path, browsing below a node
    AtNode(&'a [String]),
    /// Emergency form is shown
    EmergencyForm,
}

/// Current position in the tree plus view mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Raw labels from a root toward a leaf
    pub(crate) path: Vec<String>,

    /// Browsing or emergency form
    pub(crate) mode: Mode,

    /// Draft of the emergency form
    pub(crate) form: EmergencyForm,
}

impl NavigationState {
    /// Fresh state at the top menu
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected label chain
    #[inline]
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Current mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Emergency form draft
    #[inline]
    #[must_use]
    pub fn form(&self) -> &EmergencyForm {
        &self.form
    }

    /// Check if path is empty
    #[inline]
    #[must_use]
    pub fn is_at_root(&self) -> bool {
        self.path.is_empty()
    }

    /// One-based menu level shown to the user
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len() + 1
    }

    /// Phase of the state machine
    #[must_use]
    pub fn phase(&self) -> Phase<'_> {
        match self.mode {
            Mode::EmergencyForm => Phase::EmergencyForm,
            Mode::Browsing if self.path.is_empty() => Phase::AtRoot,
            Mode::Browsing => Phase::AtNode(&self.path),
        }
    }

    /// Clear path, form and mode
    pub(crate) fn clear(&mut self) {
        self.path.clear();
        self.form = EmergencyForm::default();
        self.mode = Mode::Browsing;
    }
}
