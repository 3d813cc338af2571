//! Request and response shapes of the REST surface.

mod contact;

pub use contact::{normalize_email, ContactDraft, EmailCheck, EmailCheckQuery};
pub use store::{Contact, ContactFields, ContactId};
