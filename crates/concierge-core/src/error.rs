//! Error types for the navigation state machine
//!
//! Unresolved node references are not errors: the session ignores them.
//! The only failure surfaced to the user is an incomplete emergency form.

use crate::form::FormField;

/// Emergency form rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields are empty
    #[error("required fields missing: {}", list_fields(.0))]
    MissingFields(Vec<FormField>),
}

impl ValidationError {
    /// Fields the user still has to fill in
    #[must_use]
    pub fn missing(&self) -> &[FormField] {
        match self {
            Self::MissingFields(fields) => fields,
        }
    }
}

fn list_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
