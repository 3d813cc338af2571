//! Errors reported by contact stores.

use thiserror::Error;

use crate::models::ContactId;

/// Failure of a single store operation. A failed write never leaves a partial row behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The write would give two contacts the same email.
    #[error("a contact with this email already exists")]
    DuplicateEmail,

    #[error("contact {0} not found")]
    NotFound(ContactId),

    /// The backing store could not be reached or failed mid-statement.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
