//! Integration tests for the operational endpoints

use serde_json::{json, Value};

use crate::relay_api::test_utils::TestRelayServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestRelayServer::open().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "signal-relay");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestRelayServer::open().await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for name in [
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
        "relay_signals_enqueued_total",
        "relay_signals_dequeued_total",
        "relay_store_connected",
    ] {
        assert!(body.contains(name), "Expected {} metric", name);
    }
}

#[tokio::test]
async fn metrics_track_relay_traffic() {
    let app = TestRelayServer::open().await;

    app.server
        .post("/enqueue")
        .json(&json!({"symbol": "EURUSD"}))
        .await;
    app.server.post("/enqueue").text("oops").await;
    app.server.get("/dequeue").await;
    app.server.get("/dequeue").await;

    assert_eq!(app.metrics.signals_enqueued_total.get(), 1);
    assert_eq!(app.metrics.signals_dequeued_total.get(), 1);
    assert_eq!(
        app.metrics
            .enqueue_rejections_total
            .with_label_values(&["invalid_input"])
            .get(),
        1
    );
    assert_eq!(app.metrics.http_requests_total.get(), 4);
}
