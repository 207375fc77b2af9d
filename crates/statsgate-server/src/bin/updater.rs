//! Background-updater server.
//!
//! Serves one gauge (`random_value`) on the bare exposition route while a
//! scheduled task refreshes it once per second. The updater runs alongside
//! the listener, not instead of it.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use statsgate_core::Registry;
use statsgate_server::{app_state::RANDOM_VALUE, router, settings::ServerSettings, updater};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = ServerSettings::default();
    let registry = Arc::new(Registry::new());
    registry
        .register_gauge(RANDOM_VALUE, "random number")
        .expect("metric registration failed");

    updater::spawn_updater(Arc::clone(&registry), settings.update_interval);
    let app = router::exposition_router(registry);

    let listen = SocketAddr::from(([0, 0, 0, 0], settings.updater_port));
    tracing::info!(%listen, "statsgate-updater starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
