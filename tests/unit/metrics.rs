//! Unit tests for the metrics registry

use signal_relay::metrics::Metrics;

#[test]
fn export_includes_relay_metrics() {
    let metrics = Metrics::new().expect("metrics initialization");
    metrics.signals_enqueued_total.inc();
    metrics
        .dequeue_failures_total
        .with_label_values(&["store"])
        .inc();

    let text = metrics.export().unwrap();
    assert!(text.contains("relay_signals_enqueued_total 1"));
    assert!(text.contains("relay_dequeue_failures_total{kind=\"store\"} 1"));
    assert!(text.contains("http_requests_total"));
}

#[test]
fn registries_are_independent() {
    let a = Metrics::new().unwrap();
    let b = Metrics::new().unwrap();
    a.signals_dequeued_total.inc();
    assert_eq!(b.signals_dequeued_total.get(), 0);
}
