//! # REST surface — axum router over [`ContactService`]
//!
//! | Method & path | Success | Failure |
//! |---------------|---------|---------|
//! | `GET /api/contacts` | 200, contacts ordered by name | 500 |
//! | `GET /api/contacts/check-email?email=&excludeId=` | 200 `{exists}` | 400 bad `excludeId`, 500 |
//! | `POST /api/contacts` | 201, created contact | 400 duplicate or invalid body, 500 |
//! | `PUT /api/contacts/{id}` | 200, updated contact | 400, 404, 500 |
//! | `DELETE /api/contacts/{id}` | 200, deleted contact | 404, 500 |
//!
//! Every failure carries a JSON [`crate::ErrorBody`]. [`cors_layer`] restricts
//! cross-origin callers to the configured client origin.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use store::{Contact, ContactId, ContactStore};
use tower_http::cors::CorsLayer;

use crate::error::ContactError;
use crate::models::{ContactDraft, EmailCheck, EmailCheckQuery};
use crate::service::ContactService;

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        if let ContactError::StoreUnavailable(cause) = &self {
            tracing::error!(%cause, "contact store unavailable");
        }
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}

/// Routes under `/api/contacts`, bound to `service`.
pub fn router<S>(service: ContactService<S>) -> Router
where
    S: ContactStore + Clone + 'static,
{
    Router::new()
        .route("/api/contacts", get(list_contacts::<S>).post(create_contact::<S>))
        .route("/api/contacts/check-email", get(check_email::<S>))
        .route(
            "/api/contacts/{id}",
            put(update_contact::<S>).delete(delete_contact::<S>),
        )
        .with_state(service)
}

/// CORS policy admitting only `origin`.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

fn contact_id(path: Result<Path<i64>, PathRejection>) -> Result<ContactId, ContactError> {
    path.map(|Path(id)| ContactId(id))
        .map_err(|_| ContactError::invalid("id", "Contact id must be a number"))
}

fn contact_draft(body: Result<Json<ContactDraft>, JsonRejection>) -> Result<ContactDraft, ContactError> {
    body.map(|Json(draft)| draft)
        .map_err(|e| ContactError::invalid("body", e.body_text()))
}

async fn list_contacts<S: ContactStore>(
    State(service): State<ContactService<S>>,
) -> Result<Json<Vec<Contact>>, ContactError> {
    Ok(Json(service.list_contacts().await?))
}

async fn check_email<S: ContactStore>(
    State(service): State<ContactService<S>>,
    Query(query): Query<EmailCheckQuery>,
) -> Result<Json<EmailCheck>, ContactError> {
    let exclude_id = query.exclude_id()?;
    let exists = service.email_exists(&query.email, exclude_id).await?;
    Ok(Json(EmailCheck { exists }))
}

async fn create_contact<S: ContactStore>(
    State(service): State<ContactService<S>>,
    body: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ContactError> {
    let draft = contact_draft(body)?;
    let contact = service.create_contact(&draft).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn update_contact<S: ContactStore>(
    State(service): State<ContactService<S>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<Json<Contact>, ContactError> {
    let id = contact_id(path)?;
    let draft = contact_draft(body)?;
    Ok(Json(service.update_contact(id, &draft).await?))
}

async fn delete_contact<S: ContactStore>(
    State(service): State<ContactService<S>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Contact>, ContactError> {
    let id = contact_id(path)?;
    Ok(Json(service.delete_contact(id).await?))
}
