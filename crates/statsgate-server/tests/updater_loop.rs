//! Background-updater server tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use statsgate_core::Registry;
use statsgate_server::{app_state::RANDOM_VALUE, router, updater};

fn updater_registry() -> Arc<Registry> {
    let registry = Arc::new(Registry::new());
    registry.register_gauge(RANDOM_VALUE, "random number").unwrap();
    registry
}

async fn scrape(app: Router) -> (StatusCode, String) {
    let res = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let body = res.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn gauge_line(body: &str) -> f64 {
    body.lines()
        .find_map(|l| l.strip_prefix("random_value "))
        .unwrap()
        .parse()
        .unwrap()
}

#[tokio::test]
async fn exposition_route_serves_valid_gauge_while_updating() {
    let registry = updater_registry();
    let handle = updater::spawn_updater(Arc::clone(&registry), Duration::from_millis(10));
    let app = router::exposition_router(registry);

    // Two scrapes spaced across several ticks; each must show a valid value.
    for _ in 0..2 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let (status, body) = scrape(app.clone()).await;
        assert_eq!(status, StatusCode::OK);
        let v = gauge_line(&body);
        assert!((0.0..=100.0).contains(&v), "gauge out of range: {v}");
    }

    assert!(!handle.is_finished(), "updater task must keep running");
    handle.abort();
}

#[tokio::test]
async fn updater_ticks_mutate_the_registry() {
    let registry = updater_registry();
    // Park the gauge outside the updater's value range.
    registry.set_gauge(RANDOM_VALUE, -1.0).unwrap();

    let handle = updater::spawn_updater(Arc::clone(&registry), Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(60)).await;

    let v = registry.gauge_value(RANDOM_VALUE).unwrap();
    assert!((0.0..=100.0).contains(&v), "updater never ticked: {v}");
    handle.abort();
}

#[tokio::test]
async fn updater_server_has_no_ping_route() {
    let app = router::exposition_router(updater_registry());
    let res = app
        .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
