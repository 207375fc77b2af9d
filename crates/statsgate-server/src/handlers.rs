//! Request handlers.
//!
//! `/ping` and `/metrics` are the inline-instrumented pair: both record one
//! request-latency observation and overwrite the demo gauge before
//! responding. `exposition` is the bare scrape handler used by the
//! background-updater server.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use rand::Rng;

use statsgate_core::Registry;

use crate::app_state::{AppState, RANDOM_VALUE};
use crate::error::ApiError;

/// Random integer 0..=100, the demo gauge's whole value range. The value
/// carries no meaning; it exists to show handlers mutating shared state.
pub(crate) fn fresh_random() -> f64 {
    rand::thread_rng().gen_range(0..=100u32).into()
}

/// `GET /ping` → `OK`, plus the two instrumentation side effects.
pub async fn ping(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<&'static str, ApiError> {
    let started = Instant::now();
    tracing::info!(path = %uri.path(), "ping request");

    state.registry().set_gauge(RANDOM_VALUE, fresh_random())?;
    state.record_request(method.as_str(), 200, uri.path(), started.elapsed())?;
    Ok("OK")
}

/// `GET /metrics` → rendered snapshot plus the trailing human-readable
/// `random_value` line. The scrape itself is instrumented the same way as
/// `/ping`, so the summary it reports includes the request being served.
pub async fn metrics(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let started = Instant::now();
    tracing::info!(path = %uri.path(), "metrics request");

    state.registry().set_gauge(RANDOM_VALUE, fresh_random())?;
    state.record_request(method.as_str(), 200, uri.path(), started.elapsed())?;

    let (mut body, content_type) = state.registry().render(accept_header(&headers))?;
    let current = state.registry().gauge_value(RANDOM_VALUE)?;
    body.push_str(&format!("\nrandom_value {current}\n"));

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// Bare `GET /metrics` for the background-updater server: render and return,
/// no instrumentation.
pub async fn exposition(
    State(registry): State<Arc<Registry>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let (body, content_type) = registry.render(accept_header(&headers))?;
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

fn accept_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::ACCEPT).and_then(|v| v.to_str().ok())
}
