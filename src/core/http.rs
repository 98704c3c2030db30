//! HTTP endpoint server using Axum

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use crate::config::{Config, StoreBackend};
use crate::metrics::Metrics;
use crate::queue::AccountQueue;
use crate::relay::{AuthGate, RelayError, RelayService};
use crate::store::{KeyValueStore, MemoryStore, RedisStore};

const SERVICE_NAME: &str = "signal-relay";

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(relay: RelayService, metrics: Arc<Metrics>) -> Self {
        Self {
            relay: Arc::new(relay),
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Answer every OPTIONS request with permissive CORS headers
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (
            StatusCode::NO_CONTENT,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,POST,OPTIONS"),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, "content-type"),
            ],
        )
            .into_response();
    }
    next.run(request).await
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// POST /enqueue
///
/// The body is read raw: webhook senders often post JSON as `text/plain`.
async fn enqueue(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, RelayError> {
    let receipt = state.relay.enqueue(&body).await?;
    Ok(([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(receipt)))
}

#[derive(Debug, Default, Deserialize)]
struct DequeueQuery {
    account: Option<String>,
}

/// GET /dequeue?account=<name>
///
/// Always 200: the next signal record, or `null`.
async fn dequeue(
    State(state): State<AppState>,
    query: Result<Query<DequeueQuery>, QueryRejection>,
) -> impl IntoResponse {
    let params = query.map(|Query(q)| q).unwrap_or_default();
    let next = state.relay.dequeue(params.account.as_deref()).await;
    ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(next))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/enqueue", post(enqueue).fallback(not_found))
        // `get` would also run the handler for HEAD, popping a signal the
        // caller never sees.
        .route(
            "/dequeue",
            get(dequeue).head(not_found).fallback(not_found),
        )
        .route(
            "/health",
            get(health_check).head(not_found).fallback(not_found),
        )
        .route(
            "/metrics",
            get(metrics_handler).head(not_found).fallback(not_found),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(axum::middleware::from_fn(preflight)),
        )
        .with_state(state)
}

/// Open the configured store backend
pub async fn connect_store(
    config: &Config,
) -> Result<Arc<dyn KeyValueStore>, Box<dyn std::error::Error + Send + Sync>> {
    let store: Arc<dyn KeyValueStore> = match config.store {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&config.redis_url).await?;
            info!(url = %config.redis_url, "Redis queue store connected");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory queue store: queues are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}

/// Wire store, queues, auth and metrics from `config`
pub async fn build_state(
    config: &Config,
) -> Result<AppState, Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new().map_err(|e| e.to_string())?);

    let store = match connect_store(config).await {
        Ok(store) => {
            metrics.store_connected.set(1.0);
            store
        }
        Err(e) => {
            metrics.store_connected.set(0.0);
            return Err(format!("Queue store connection required: {}", e).into());
        }
    };

    let queue = if config.serialize_accounts {
        info!("Per-account operations serialized within this process");
        AccountQueue::serialized(store)
    } else {
        AccountQueue::new(store)
    };

    let auth = AuthGate::new(config.webhook_secret.clone());
    if auth.is_open() {
        tracing::warn!("WEBHOOK_SECRET not set: /enqueue accepts any caller");
    }

    let relay = RelayService::new(auth, queue).with_metrics(metrics.clone());
    Ok(AppState::new(relay, metrics))
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = build_state(&config).await?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
