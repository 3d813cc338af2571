//! # API crate — contact service, REST surface and client
//!
//! This crate sits between the browser and the store. It owns the business
//! rules of the contact directory, the HTTP contract that exposes them, and the
//! client used by the UI to call that contract.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | — | Request schema ([`ContactDraft`]) and validation, check-email query and response |
//! | [`error`] | — | [`ContactError`] taxonomy, HTTP status mapping, JSON error bodies |
//! | [`service`] | — | [`ContactService`]: list, email pre-check, create, update, delete over any [`store::ContactStore`] |
//! | [`client`] | — | [`ContactApi`] trait used by the UI; [`HttpClient`] implementation over `reqwest` |
//! | `db` | `server` | Postgres pool, migrations and `db::PgStore` |
//! | `settings` | `server` | Layered configuration (defaults, `config.toml`, environment) |
//! | `routes` | `server` | axum router for `/api/contacts` and the CORS policy |
//!
//! The service and client compile for every target, so the UI controller can
//! run against an in-process [`ContactService`] in tests and against
//! [`HttpClient`] in the browser.

pub mod client;
#[cfg(feature = "server")]
pub mod db;
pub mod error;
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
pub mod service;
#[cfg(feature = "server")]
pub mod settings;

pub use client::{ContactApi, HttpClient};
pub use error::{ContactError, ErrorBody};
pub use models::{Contact, ContactDraft, ContactFields, ContactId, EmailCheck};
pub use service::ContactService;
