//! # Domain model for the contact directory
//!
//! Defines the data structures persisted by a [`crate::ContactStore`] and returned
//! to callers. These types are `Serialize + Deserialize` so they can cross the
//! server/client boundary as JSON unchanged.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`ContactId`] | Store-assigned identity of a contact. Serialises as a bare number. Never reused once retired. |
//! | [`Contact`] | A fully committed directory entry: id, name and email. |
//! | [`ContactFields`] | The mutable part of a contact (name + email), already validated and normalised. This is what the store writes on insert and update. |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity assigned by the store when a contact is inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ContactId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A contact as stored in the directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
}

impl Contact {
    pub fn new(id: ContactId, fields: ContactFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
        }
    }

    /// Copy of the mutable fields, e.g. to seed an edit form.
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Name and email ready to be written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
}

impl ContactFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
