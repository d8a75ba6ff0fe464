//! Emergency contact form

use crate::error::ValidationError;
use concierge_ledger::EmergencyContact;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Field of the emergency form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    /// Customer name
    Name,
    /// Contact email
    Email,
    /// Store of the booking
    Store,
    /// Description of the situation
    Situation,
}

impl FormField {
    /// All fields in form order
    pub const ALL: [FormField; 4] = [Self::Name, Self::Email, Self::Store, Self::Situation];
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Store => "store",
            Self::Situation => "situation",
        };
        f.write_str(name)
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "store" => Ok(Self::Store),
            "situation" => Ok(Self::Situation),
            other => Err(format!("unknown form field: {other}")),
        }
    }
}

/// Draft of the emergency form
///
/// All four fields are required. Only the empty string counts as missing;
/// whitespace is accepted as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyForm {
    /// Customer name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Store of the booking
    pub store: String,
    /// Description of the situation
    pub situation: String,
}

impl EmergencyForm {
    /// Create a filled-in form
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        store: impl Into<String>,
        situation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            store: store.into(),
            situation: situation.into(),
        }
    }

    /// Read a field
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Store => &self.store,
            FormField::Situation => &self.situation,
        }
    }

    /// Overwrite a field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Store => &mut self.store,
            FormField::Situation => &mut self.situation,
        };
        *slot = value.into();
    }

    /// Required fields that are still empty, in form order
    #[must_use]
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// Check the form and convert it into ticket contact data
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingFields`] if any field is empty
    pub fn validate(&self) -> Result<EmergencyContact, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        Ok(EmergencyContact {
            name: self.name.clone(),
            email: self.email.clone(),
            store: self.store.clone(),
            situation: self.situation.clone(),
            ..EmergencyContact::default()
        })
    }

    /// Check if every field is empty
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.missing_fields().len() == FormField::ALL.len()
    }
}
