//! Inline-instrumented server.
//!
//! - `GET /ping` → `OK`
//! - `GET /metrics` → exposition snapshot + trailing `random_value` line
//!
//! Every request records a latency summary observation and overwrites the
//! demo gauge.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use statsgate_server::{app_state::AppState, router, settings::ServerSettings};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = ServerSettings::default();
    let state = AppState::new().expect("metric registration failed");
    let app = router::build_router(state);

    let listen = SocketAddr::from(([0, 0, 0, 0], settings.inline_port));
    tracing::info!(%listen, "statsgate-inline starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
