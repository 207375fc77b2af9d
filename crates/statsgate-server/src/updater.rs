//! Background gauge updater.
//!
//! Runs as its own tokio task so the HTTP listener stays responsive while
//! the gauge ticks; the listener never blocks on the updater and vice versa.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

use statsgate_core::Registry;

use crate::app_state::RANDOM_VALUE;
use crate::handlers::fresh_random;

/// Spawn a task that overwrites `random_value` every `interval`, forever.
/// A set failure is logged and the loop keeps ticking.
pub fn spawn_updater(registry: Arc<Registry>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        // First tick fires immediately; skip it so the gauge holds its
        // initial value for one full period.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let value = fresh_random();
            match registry.set_gauge(RANDOM_VALUE, value) {
                Ok(()) => tracing::debug!(value, "gauge updated"),
                Err(e) => tracing::warn!(error = %e, "gauge update failed"),
            }
        }
    })
}
