//! Liveness probe backed by a database round-trip.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;
use utoipa::{OpenApi, ToSchema};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(health), components(schemas(HealthReport)))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthReport {
    /// `"ok"` or `"unavailable"`.
    pub status: String,
    pub database: bool,
    pub version: String,
}

/// Reports whether the contact store answers queries.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Store reachable", body = HealthReport),
        (status = 503, description = "Store unreachable", body = HealthReport)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    let database = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "health check could not reach the database");
            false
        }
    };
    let (code, status) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };
    (
        code,
        Json(HealthReport {
            status: status.to_owned(),
            database,
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }),
    )
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use crate::config::Config;
    use crate::routes::build;
    use crate::routes::test_support::{get_request, json_body, send, test_state};

    #[tokio::test]
    async fn reports_ok_while_store_is_open() {
        let app = build(test_state(Config::default()).await);
        let resp = send(&app, get_request("/health")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn reports_unavailable_once_store_is_closed() {
        let state = test_state(Config::default()).await;
        state.store.close().await;
        let app = build(state);
        let resp = send(&app, get_request("/health")).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "unavailable");
        assert_eq!(body["database"], false);
    }
}
