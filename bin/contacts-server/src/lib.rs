//! contacts-server: a REST service that lists and creates contact records.
//!
//! The binary in `main.rs` wires configuration, tracing, and the HTTP
//! listener; everything it serves is assembled here so tests (and the
//! client crate's end-to-end tests) can build the same router in-process.

pub mod config;
pub mod entities;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod schemas;
pub mod state;

use std::sync::Arc;

pub use config::Config;
pub use entities::{ContactStore, SqliteStore};
pub use state::AppState;

/// Build the full application router over `state`.
pub fn app(state: Arc<AppState>) -> axum::Router {
    routes::build(state)
}
