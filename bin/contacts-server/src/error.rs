//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a `{"error": "..."}` JSON body with an appropriate status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contacts_types::ErrorBody;
use thiserror::Error;
use tracing::{error, warn};

/// All errors that can occur in the contacts-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the SQLite store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match self {
            ServerError::BadRequest(m) => {
                warn!(message = %m, "rejected request");
                (StatusCode::BAD_REQUEST, m)
            }
            // Storage failures are surfaced verbatim; the caller cannot tell
            // whether a failed insert was persisted, so it gets the raw cause.
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(ErrorBody::new(client_message))).into_response()
    }
}
