//! Axum router wiring.
//!
//! The inline server accepts trailing-slash variants of both routes; the
//! updater server exposes only the exposition route.

use std::sync::Arc;

use axum::{routing::get, Router};

use statsgate_core::Registry;

use crate::{app_state::AppState, handlers};

/// Routes for the inline-instrumented server.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/ping/", get(handlers::ping))
        .route("/metrics", get(handlers::metrics))
        .route("/metrics/", get(handlers::metrics))
        .with_state(state)
}

/// The "serve exposition snapshot over HTTP" capability on its own: exactly
/// one route against an explicit registry handle.
pub fn exposition_router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/metrics", get(handlers::exposition))
        .with_state(registry)
}
