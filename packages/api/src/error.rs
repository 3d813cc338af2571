//! # Error taxonomy shared by the service, the REST surface and the client
//!
//! [`ContactError`] is the single error type that crosses every layer. The
//! service produces it, the server turns it into an HTTP status plus a JSON
//! `{ "error": ... }` body, and [`crate::HttpClient`] turns that response back
//! into the same variant so the UI can react to it.
//!
//! | Variant | Status | User-facing? |
//! |---------|--------|--------------|
//! | `DuplicateEmail` | 400 | field error on the email input |
//! | `Invalid` | 400 | field error on the named input |
//! | `NotFound` | 404 | form-level message |
//! | `StoreUnavailable` | 500 | generic banner; cause is logged, never sent |

use serde::{Deserialize, Serialize};
use store::StoreError;
use thiserror::Error;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "A contact with this email already exists";
pub const NOT_FOUND_MESSAGE: &str = "Contact not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{}", DUPLICATE_EMAIL_MESSAGE)]
    DuplicateEmail,

    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Request did not match the contact schema.
    #[error("{reason}")]
    Invalid { field: String, reason: String },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// JSON body of every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ContactError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status(&self) -> u16 {
        match self {
            Self::DuplicateEmail | Self::Invalid { .. } => 400,
            Self::NotFound => 404,
            Self::StoreUnavailable(_) => 500,
        }
    }

    /// Body sent to the client. Infrastructure causes stay on the server.
    pub fn body(&self) -> ErrorBody {
        match self {
            Self::DuplicateEmail => ErrorBody {
                error: DUPLICATE_EMAIL_MESSAGE.to_string(),
                field: Some("email".to_string()),
            },
            Self::NotFound => ErrorBody {
                error: NOT_FOUND_MESSAGE.to_string(),
                field: None,
            },
            Self::Invalid { field, reason } => ErrorBody {
                error: reason.clone(),
                field: Some(field.clone()),
            },
            Self::StoreUnavailable(_) => ErrorBody {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                field: None,
            },
        }
    }

    /// Rebuild the error from a failed HTTP response.
    pub fn from_response(status: u16, body: Option<ErrorBody>) -> Self {
        match (status, body) {
            (400, Some(body)) if body.error == DUPLICATE_EMAIL_MESSAGE => Self::DuplicateEmail,
            (400, Some(body)) => Self::Invalid {
                field: body.field.unwrap_or_default(),
                reason: body.error,
            },
            (400, None) => Self::invalid("", "Bad request"),
            (404, _) => Self::NotFound,
            (status, Some(body)) => Self::StoreUnavailable(format!("{status}: {}", body.error)),
            (status, None) => Self::StoreUnavailable(format!("unexpected status {status}")),
        }
    }

    /// Whether this error belongs on the email input rather than the banner.
    pub fn is_email_error(&self) -> bool {
        match self {
            Self::DuplicateEmail => true,
            Self::Invalid { field, .. } => field == "email",
            _ => false,
        }
    }
}

impl From<StoreError> for ContactError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::DuplicateEmail,
            StoreError::NotFound(_) => Self::NotFound,
            StoreError::Unavailable(cause) => Self::StoreUnavailable(cause),
        }
    }
}
