//! # Contact store — the persistence seam of the directory
//!
//! [`ContactStore`] is the interface every backend implements: the in-memory
//! [`crate::MemoryStore`] used by tests and local development, and the Postgres
//! store in the `api` crate used in production. The service layer is generic over
//! it, so the same business rules run against either.
//!
//! ## Contract
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`list_all`](ContactStore::list_all) | Every contact, ordered by name (ties broken by id). |
//! | [`get`](ContactStore::get) | One contact by id, `None` if absent. |
//! | [`find_by_email`](ContactStore::find_by_email) | The contact owning an email, `None` if free. |
//! | [`insert`](ContactStore::insert) | Assigns a fresh id and stores the row. |
//! | [`update`](ContactStore::update) | Replaces name and email of an existing row in place. |
//! | [`delete`](ContactStore::delete) | Removes a row and returns it as it was. |
//!
//! Each method is atomic on its own. `insert` and `update` enforce email
//! uniqueness inside that atomic step and fail with
//! [`StoreError::DuplicateEmail`] when another row already owns the email, no
//! matter what any earlier lookup returned. Ids are never handed out twice, even
//! after the row they named is deleted.

use std::future::Future;

use crate::error::StoreError;
use crate::models::{Contact, ContactFields, ContactId};

/// Async interface over the contacts table.
pub trait ContactStore: Send + Sync {
    fn list_all(&self) -> impl Future<Output = Result<Vec<Contact>, StoreError>> + Send;

    fn get(
        &self,
        id: ContactId,
    ) -> impl Future<Output = Result<Option<Contact>, StoreError>> + Send;

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Contact>, StoreError>> + Send;

    fn insert(
        &self,
        fields: &ContactFields,
    ) -> impl Future<Output = Result<Contact, StoreError>> + Send;

    fn update(
        &self,
        id: ContactId,
        fields: &ContactFields,
    ) -> impl Future<Output = Result<Contact, StoreError>> + Send;

    fn delete(&self, id: ContactId) -> impl Future<Output = Result<Contact, StoreError>> + Send;
}
