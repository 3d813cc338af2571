pub mod error;
pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use error::StoreError;
pub use models::{Contact, ContactFields, ContactId};
pub use repo::ContactStore;
