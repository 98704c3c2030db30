//! Test utilities for relay API integration tests

use axum_test::TestServer;
use signal_relay::core::http::{create_router, AppState};
use signal_relay::metrics::Metrics;
use signal_relay::queue::AccountQueue;
use signal_relay::relay::{AuthGate, RelayService};
use std::sync::Arc;

use crate::recording_store::RecordingStore;

pub const SECRET: &str = "tv-webhook-secret";

/// Test helper bundling the HTTP server with its store and metrics
#[allow(dead_code)]
pub struct TestRelayServer {
    pub server: TestServer,
    pub store: Arc<RecordingStore>,
    pub metrics: Arc<Metrics>,
}

impl TestRelayServer {
    /// Server with no webhook secret configured
    pub async fn open() -> Self {
        Self::build(None)
    }

    /// Server gated by [`SECRET`]
    pub async fn secured() -> Self {
        Self::build(Some(SECRET.to_string()))
    }

    fn build(secret: Option<String>) -> Self {
        let store = Arc::new(RecordingStore::new());
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let relay = RelayService::new(AuthGate::new(secret), AccountQueue::new(store.clone()))
            .with_metrics(metrics.clone());

        let app = create_router(AppState::new(relay, metrics.clone()));
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            store,
            metrics,
        }
    }
}
