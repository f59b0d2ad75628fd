use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use contacts_types::{Contact, ErrorBody};
use tracing::info;
use utoipa::OpenApi;

use crate::entities::ContactStore;
use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::schemas::contact::CreateContactRequest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_contacts, create_contact),
    components(schemas(CreateContactRequest, Contact, ErrorBody))
)]
pub struct ContactsApi;

/// Register contact routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/contacts", get(list_contacts).post(create_contact))
}

// ── Contact handlers ──────────────────────────────────────────────────────────

/// List every contact, newest first.
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "contacts",
    responses(
        (status = 200, description = "All contacts, newest first", body = Vec<Contact>),
        (status = 500, description = "Storage error", body = ErrorBody),
    )
)]
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Contact>>, ServerError> {
    let contacts = state.store.list_all().await?;
    Ok(Json(contacts.iter().map(|c| c.to_response()).collect()))
}

/// Create a contact.
///
/// Not idempotent: a retried request after a lost response inserts twice.
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 400, description = "Missing name, email, or phone", body = ErrorBody),
        (status = 500, description = "Storage error", body = ErrorBody),
    )
)]
pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateContactRequest>,
) -> Result<(StatusCode, Json<Contact>), ServerError> {
    let candidate = req.into_new_contact(state.config.strict_email)?;
    let stored = state.store.insert(candidate).await?;
    info!(contact_id = %stored.id, "contact created");
    Ok((StatusCode::CREATED, Json(stored.to_response())))
}
