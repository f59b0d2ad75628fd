//! Request extractors.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::ServerError;

/// `axum::Json` whose rejections are rendered as `{"error": ...}` with 400,
/// matching every other error body the API returns.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}
