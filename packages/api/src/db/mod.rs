//! # Database module — Postgres-backed contact store
//!
//! Only compiled with the `server` feature, so client (WASM) builds never pull
//! in SQLx.
//!
//! - [`connect`] opens a connection pool sized and timed out from
//!   [`crate::settings::DatabaseSettings`]; [`migrate`] applies the embedded
//!   migrations in `packages/api/migrations`.
//! - [`PgStore`] implements [`store::ContactStore`] on top of that pool. The
//!   `contacts.email` column is `UNIQUE`, which is what actually keeps two rows
//!   from sharing an email.

mod pg_store;
mod pool;

pub use pg_store::PgStore;
pub use pool::{connect, migrate};
