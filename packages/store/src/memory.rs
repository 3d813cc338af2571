use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;
use crate::models::{Contact, ContactFields, ContactId};
use crate::repo::ContactStore;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<ContactId, Contact>,
    /// Last id handed out; only ever grows.
    last_id: i64,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<ContactId>) -> bool {
        self.rows
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }
}

/// In-memory ContactStore for testing and local development.
///
/// Every operation runs under one lock, so the uniqueness check and the write
/// it guards happen in the same critical section.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    table: Arc<Mutex<Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<MutexGuard<'_, Table>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl ContactStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Contact>, StoreError> {
        let table = self.table()?;
        let mut contacts: Vec<Contact> = table.rows.values().cloned().collect();
        contacts.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(contacts)
    }

    async fn get(&self, id: ContactId) -> Result<Option<Contact>, StoreError> {
        Ok(self.table()?.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Contact>, StoreError> {
        Ok(self
            .table()?
            .rows
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn insert(&self, fields: &ContactFields) -> Result<Contact, StoreError> {
        let mut table = self.table()?;
        if table.email_taken(&fields.email, None) {
            return Err(StoreError::DuplicateEmail);
        }
        table.last_id += 1;
        let contact = Contact::new(ContactId(table.last_id), fields.clone());
        table.rows.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: ContactId, fields: &ContactFields) -> Result<Contact, StoreError> {
        let mut table = self.table()?;
        if !table.rows.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        if table.email_taken(&fields.email, Some(id)) {
            return Err(StoreError::DuplicateEmail);
        }
        let contact = Contact::new(id, fields.clone());
        table.rows.insert(id, contact.clone());
        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> Result<Contact, StoreError> {
        self.table()?
            .rows
            .remove(&id)
            .ok_or(StoreError::NotFound(id))
    }
}
