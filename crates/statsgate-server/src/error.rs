//! HTTP error mapping for handler failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use statsgate_core::StatsgateError;

/// Handler-level error. Everything a handler can hit maps to a 500; the
/// metric set is fixed at startup, so any core error at request time is a
/// wiring bug, not client input.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] StatsgateError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request handling failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
    }
}
