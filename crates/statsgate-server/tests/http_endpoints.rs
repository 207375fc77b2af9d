//! Inline-instrumented server endpoint tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use statsgate_server::{app_state::AppState, router};

fn inline_app() -> Router {
    router::build_router(AppState::new().unwrap())
}

async fn get(app: Router, uri: &str, accept: Option<&str>) -> (StatusCode, String, String) {
    let mut req = Request::builder().uri(uri);
    if let Some(a) = accept {
        req = req.header(header::ACCEPT, a);
    }
    let res = app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();

    let status = res.status();
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = res.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

/// Sample and trailing lines both read `random_value <float>`.
fn random_value_lines(body: &str) -> Vec<f64> {
    body.lines()
        .filter_map(|l| l.strip_prefix("random_value "))
        .map(|v| v.parse().unwrap())
        .collect()
}

#[tokio::test]
async fn ping_returns_ok() {
    let (status, _, body) = get(inline_app(), "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn trailing_slash_variants_accepted() {
    let app = inline_app();
    let (status, _, body) = get(app.clone(), "/ping/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, _, _) = get(app, "/metrics/", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn metrics_reports_random_value_twice() {
    let (status, content_type, body) = get(inline_app(), "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "text/plain; version=0.0.4; charset=utf-8");

    // Once as the exposition sample, once as the trailing human-readable
    // line, both showing the same freshly set value.
    let values = random_value_lines(&body);
    assert_eq!(values.len(), 2, "body was: {body}");
    assert_eq!(values[0], values[1]);
    for v in values {
        assert!((0.0..=100.0).contains(&v));
    }
    assert!(body.ends_with('\n'));
}

#[tokio::test]
async fn requests_recorded_in_latency_summary() {
    let app = inline_app();
    let (status, _, _) = get(app.clone(), "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, _, body) = get(app, "/metrics", None).await;

    assert!(body.contains("# TYPE http_server_requests summary"));
    assert!(body
        .contains("http_server_requests_count{method=\"GET\",code=\"200\",uri=\"/ping\"} 1\n"));
    // The scrape instruments itself before rendering.
    assert!(body
        .contains("http_server_requests_count{method=\"GET\",code=\"200\",uri=\"/metrics\"} 1\n"));
}

#[tokio::test]
async fn repeated_pings_accumulate() {
    let app = inline_app();
    for _ in 0..3 {
        let (status, _, _) = get(app.clone(), "/ping", None).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, _, body) = get(app, "/metrics", None).await;
    assert!(body
        .contains("http_server_requests_count{method=\"GET\",code=\"200\",uri=\"/ping\"} 3\n"));
}

#[tokio::test]
async fn openmetrics_negotiated_from_accept_header() {
    let (status, content_type, body) = get(
        inline_app(),
        "/metrics",
        Some("application/openmetrics-text; version=1.0.0"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        content_type,
        "application/openmetrics-text; version=1.0.0; charset=utf-8"
    );
    // The quirk line is appended after the snapshot, EOF trailer included.
    assert!(body.contains("# EOF\n"));
    assert_eq!(random_value_lines(&body).len(), 2);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _, _) = get(inline_app(), "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
