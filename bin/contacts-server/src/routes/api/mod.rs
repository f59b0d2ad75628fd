pub mod contacts;

use std::sync::Arc;

use axum::Router;
use utoipa::OpenApi;

use crate::state::AppState;

/// Routes nested under `/api`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().merge(contacts::router())
}

pub fn api_docs() -> utoipa::openapi::OpenApi {
    contacts::ContactsApi::openapi()
}
