//! # Client side of the REST surface
//!
//! [`ContactApi`] is what the UI controller talks to. Two implementations:
//!
//! - [`HttpClient`] calls the REST endpoints with `reqwest` (works in the
//!   browser and natively) and rebuilds [`ContactError`] from failed responses.
//! - [`ContactService`] itself, for running the controller in-process against
//!   any [`ContactStore`], which is how the controller is tested.

use std::future::Future;

use serde::de::DeserializeOwned;
use store::{Contact, ContactId, ContactStore};

use crate::error::{ContactError, ErrorBody};
use crate::models::{ContactDraft, EmailCheck};
use crate::service::ContactService;

/// Operations the client needs from the directory backend.
pub trait ContactApi {
    fn list(&self) -> impl Future<Output = Result<Vec<Contact>, ContactError>>;

    fn check_email(
        &self,
        email: &str,
        exclude_id: Option<ContactId>,
    ) -> impl Future<Output = Result<bool, ContactError>>;

    fn create(&self, draft: &ContactDraft) -> impl Future<Output = Result<Contact, ContactError>>;

    fn update(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> impl Future<Output = Result<Contact, ContactError>>;

    fn delete(&self, id: ContactId) -> impl Future<Output = Result<Contact, ContactError>>;
}

impl<S: ContactStore> ContactApi for ContactService<S> {
    async fn list(&self) -> Result<Vec<Contact>, ContactError> {
        self.list_contacts().await
    }

    async fn check_email(
        &self,
        email: &str,
        exclude_id: Option<ContactId>,
    ) -> Result<bool, ContactError> {
        self.email_exists(email, exclude_id).await
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Contact, ContactError> {
        self.create_contact(draft).await
    }

    async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<Contact, ContactError> {
        self.update_contact(id, draft).await
    }

    async fn delete(&self, id: ContactId) -> Result<Contact, ContactError> {
        self.delete_contact(id).await
    }
}

/// REST client for `/api/contacts`.
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpClient {
    /// `base_url` is the server origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn contact_url(&self, id: ContactId) -> String {
        self.url(&format!("/api/contacts/{id}"))
    }
}

fn transport_error(err: reqwest::Error) -> ContactError {
    ContactError::StoreUnavailable(err.to_string())
}

async fn decode<T: DeserializeOwned>(
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, ContactError> {
    let response = response.map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(transport_error);
    }
    let body = response.json::<ErrorBody>().await.ok();
    Err(ContactError::from_response(status.as_u16(), body))
}

impl ContactApi for HttpClient {
    async fn list(&self) -> Result<Vec<Contact>, ContactError> {
        decode(self.http.get(self.url("/api/contacts")).send().await).await
    }

    async fn check_email(
        &self,
        email: &str,
        exclude_id: Option<ContactId>,
    ) -> Result<bool, ContactError> {
        let mut params = vec![("email", email.to_string())];
        if let Some(id) = exclude_id {
            params.push(("excludeId", id.to_string()));
        }
        let check: EmailCheck = decode(
            self.http
                .get(self.url("/api/contacts/check-email"))
                .query(&params)
                .send()
                .await,
        )
        .await?;
        Ok(check.exists)
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Contact, ContactError> {
        decode(
            self.http
                .post(self.url("/api/contacts"))
                .json(draft)
                .send()
                .await,
        )
        .await
    }

    async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<Contact, ContactError> {
        decode(self.http.put(self.contact_url(id)).json(draft).send().await).await
    }

    async fn delete(&self, id: ContactId) -> Result<Contact, ContactError> {
        decode(self.http.delete(self.contact_url(id)).send().await).await
    }
}
