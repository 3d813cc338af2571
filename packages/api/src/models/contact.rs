//! # Contact request schema
//!
//! [`ContactDraft`] is the body accepted by `POST /api/contacts` and
//! `PUT /api/contacts/{id}`, and the value the client form edits. Every field
//! is optional on the wire so that a missing field is reported as a field
//! error by [`ContactDraft::validate`] instead of a generic decode failure.
//!
//! Validation trims the name, trims and lowercases the email, and rejects
//! anything that is not `local@domain`. The resulting [`ContactFields`] is the
//! only thing the service ever hands to a store.

use serde::{Deserialize, Serialize};
use store::{Contact, ContactFields, ContactId};

use crate::error::ContactError;

/// Unvalidated name and email as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Check the draft against the contact schema.
    pub fn validate(&self) -> Result<ContactFields, ContactError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContactError::invalid("name", "Name is required"));
        }

        let email = normalize_email(&self.email);
        if email.is_empty() {
            return Err(ContactError::invalid("email", "Email is required"));
        }
        if !is_well_formed_email(&email) {
            return Err(ContactError::invalid("email", "Invalid email address"));
        }

        Ok(ContactFields::new(name, email))
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self::new(contact.name.clone(), contact.email.clone())
    }
}

/// Canonical form under which emails are stored and compared.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn is_well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Query string of `GET /api/contacts/check-email`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmailCheckQuery {
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "excludeId")]
    pub exclude_id: Option<String>,
}

impl EmailCheckQuery {
    /// The id to ignore, treating an empty parameter as absent.
    pub fn exclude_id(&self) -> Result<Option<ContactId>, ContactError> {
        match self.exclude_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(|id| Some(ContactId(id)))
                .map_err(|_| ContactError::invalid("excludeId", "excludeId must be a number")),
        }
    }
}

/// Response of `GET /api/contacts/check-email`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheck {
    pub exists: bool,
}
