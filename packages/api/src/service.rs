//! # Contact service — business rules over a [`ContactStore`]
//!
//! [`ContactService`] is stateless apart from the store handle it wraps; the
//! same value is cloned into every request handler.
//!
//! ## Uniqueness is checked twice
//!
//! Writes first ask the store who owns the email ([`ContactService::email_exists`])
//! and fail fast with [`ContactError::DuplicateEmail`] when it is taken. That
//! lookup is advisory: a concurrent writer can claim the email between the
//! lookup and the write. The store re-checks uniqueness atomically inside
//! `insert`/`update`, and a rejection there is reported as the same
//! `DuplicateEmail`, never as an infrastructure failure.

use store::{Contact, ContactId, ContactStore, StoreError};

use crate::error::ContactError;
use crate::models::{normalize_email, ContactDraft};

#[derive(Clone, Debug, Default)]
pub struct ContactService<S> {
    store: S,
}

impl<S: ContactStore> ContactService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All contacts ordered by name.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ContactError> {
        Ok(self.store.list_all().await?)
    }

    /// Whether `email` belongs to a contact other than `exclude_id`.
    pub async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<ContactId>,
    ) -> Result<bool, ContactError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Ok(false);
        }
        let owner = self.store.find_by_email(&email).await?;
        Ok(owner.is_some_and(|c| Some(c.id) != exclude_id))
    }

    pub async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, ContactError> {
        let fields = draft.validate()?;
        if self.email_exists(&fields.email, None).await? {
            return Err(ContactError::DuplicateEmail);
        }

        match self.store.insert(&fields).await {
            Ok(contact) => {
                tracing::info!(id = %contact.id, "created contact");
                Ok(contact)
            }
            Err(StoreError::DuplicateEmail) => {
                tracing::warn!("email claimed concurrently, create rejected");
                Err(ContactError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update_contact(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactError> {
        let fields = draft.validate()?;
        if self.email_exists(&fields.email, Some(id)).await? {
            return Err(ContactError::DuplicateEmail);
        }

        match self.store.update(id, &fields).await {
            Ok(contact) => {
                tracing::info!(%id, "updated contact");
                Ok(contact)
            }
            Err(StoreError::DuplicateEmail) => {
                tracing::warn!(%id, "email claimed concurrently, update rejected");
                Err(ContactError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a contact, returning it as it was just before deletion.
    pub async fn delete_contact(&self, id: ContactId) -> Result<Contact, ContactError> {
        let contact = self.store.delete(id).await?;
        tracing::info!(%id, "deleted contact");
        Ok(contact)
    }
}
