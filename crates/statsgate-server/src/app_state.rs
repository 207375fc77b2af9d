//! Shared application state for the inline-instrumented server.
//!
//! The registry is constructed here and handed to handlers through axum
//! state. No process-global registry exists; tests build as many independent
//! states as they need.

use std::sync::Arc;
use std::time::Duration;

use statsgate_core::{Registry, Result};

/// Demo gauge overwritten on every request.
pub const RANDOM_VALUE: &str = "random_value";
/// Per-request latency summary, labeled by method / status code / path.
pub const HTTP_REQUEST_SUMMARY: &str = "http_server_requests";

#[derive(Clone)]
pub struct AppState {
    registry: Arc<Registry>,
}

impl AppState {
    /// Build the state and register the fixed metric set. Fails fast on a
    /// duplicate name so a wiring mistake surfaces at startup, not at scrape
    /// time.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        registry.register_gauge(RANDOM_VALUE, "random number")?;
        registry.register_summary(
            HTTP_REQUEST_SUMMARY,
            "Num of request time summary",
            &["method", "code", "uri"],
        )?;
        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record one request-latency observation against the summary.
    pub fn record_request(
        &self,
        method: &str,
        status: u16,
        path: &str,
        elapsed: Duration,
    ) -> Result<()> {
        self.registry.observe_summary(
            HTTP_REQUEST_SUMMARY,
            &[method, &status.to_string(), path],
            elapsed.as_secs_f64(),
        )
    }
}
