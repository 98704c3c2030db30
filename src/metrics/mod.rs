//! Prometheus metrics for the relay

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub signals_enqueued_total: IntCounter,
    pub signals_dequeued_total: IntCounter,
    /// Labelled by `reason`: `invalid_input`, `unauthorized`, `storage`.
    pub enqueue_rejections_total: IntCounterVec,
    /// Labelled by `kind`: `store`, `decode`. These are masked from the poller.
    pub dequeue_failures_total: IntCounterVec,
    pub store_connected: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let signals_enqueued_total = IntCounter::new(
            "relay_signals_enqueued_total",
            "Signals appended to an account queue",
        )?;
        let signals_dequeued_total = IntCounter::new(
            "relay_signals_dequeued_total",
            "Signals handed out to a polling consumer",
        )?;
        let enqueue_rejections_total = IntCounterVec::new(
            Opts::new(
                "relay_enqueue_rejections_total",
                "Enqueue requests that did not append a signal",
            ),
            &["reason"],
        )?;
        let dequeue_failures_total = IntCounterVec::new(
            Opts::new(
                "relay_dequeue_failures_total",
                "Dequeue failures answered with an empty result",
            ),
            &["kind"],
        )?;
        let store_connected = Gauge::new(
            "relay_store_connected",
            "Whether the queue store connection is established (1) or not (0)",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(signals_enqueued_total.clone()))?;
        registry.register(Box::new(signals_dequeued_total.clone()))?;
        registry.register(Box::new(enqueue_rejections_total.clone()))?;
        registry.register(Box::new(dequeue_failures_total.clone()))?;
        registry.register(Box::new(store_connected.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            signals_enqueued_total,
            signals_dequeued_total,
            enqueue_rejections_total,
            dequeue_failures_total,
            store_connected,
        })
    }

    /// Render every registered metric in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
