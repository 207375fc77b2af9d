//! statsgate server library.
//!
//! Wires the core registry into two small axum servers: the
//! inline-instrumented one (`/ping` + `/metrics`, per-request summary and
//! gauge mutation) and the background-updater one (exposition route only,
//! gauge refreshed by a scheduled task). Consumed by the binaries and by
//! integration tests.

pub mod app_state;
pub mod error;
pub mod handlers;
pub mod router;
pub mod settings;
pub mod updater;
