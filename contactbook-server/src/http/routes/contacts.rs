//! Contact endpoints
//!
//! Every write validates through `contactbook_core::validation` before
//! touching the database.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use contactbook_core::format::{build_contact_email_clipboard_text, format_us_phone_number};
use contactbook_core::{validate_contact_input, Contact};
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::ContactRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ContactBody, ValidContactId};
use crate::http::server::AppState;

/// Contact response
#[derive(Serialize)]
pub struct ContactResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub phone_display: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Contact> for ContactResponse {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            phone_display: format_us_phone_number(&c.phone),
            name: c.name,
            email: c.email,
            phone: c.phone,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// GET /contacts - list contacts, newest first
async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContactResponse>>, ApiError> {
    let contacts = ContactRepo::new(&state.db).list().await?;
    Ok(Json(contacts.into_iter().map(ContactResponse::from).collect()))
}

/// POST /contacts - create a contact
async fn create_contact(
    State(state): State<Arc<AppState>>,
    ContactBody(req): ContactBody,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let input = validate_contact_input(&req)?;
    let contact = ContactRepo::new(&state.db).create(&input).await?;

    tracing::info!(id = %contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(ContactResponse::from(contact))))
}

/// GET /contacts/{id} - get a single contact
async fn get_contact(
    State(state): State<Arc<AppState>>,
    ValidContactId(id): ValidContactId,
) -> Result<Json<ContactResponse>, ApiError> {
    let contact = ContactRepo::new(&state.db).get(id).await?;
    Ok(Json(ContactResponse::from(contact)))
}

/// PUT /contacts/{id} - replace a contact's fields
async fn update_contact(
    State(state): State<Arc<AppState>>,
    ValidContactId(id): ValidContactId,
    ContactBody(req): ContactBody,
) -> Result<Json<ContactResponse>, ApiError> {
    let input = validate_contact_input(&req)?;
    let contact = ContactRepo::new(&state.db).update(id, &input).await?;

    tracing::info!(id = %contact.id, "contact updated");
    Ok(Json(ContactResponse::from(contact)))
}

/// DELETE /contacts/{id} - delete a contact
async fn delete_contact(
    State(state): State<Arc<AppState>>,
    ValidContactId(id): ValidContactId,
) -> Result<StatusCode, ApiError> {
    ContactRepo::new(&state.db).delete(id).await?;

    tracing::info!(id = %id, "contact deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /contacts/{id}/clipboard - plain-text block for pasting into an email
async fn contact_clipboard(
    State(state): State<Arc<AppState>>,
    ValidContactId(id): ValidContactId,
) -> Result<impl IntoResponse, ApiError> {
    let contact = ContactRepo::new(&state.db).get(id).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        build_contact_email_clipboard_text(&contact),
    ))
}

/// Contact routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route("/contacts/{id}/clipboard", get(contact_clipboard))
}
