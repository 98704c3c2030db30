//! Enqueue and dequeue, composed from the auth gate and account queues

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::metrics::Metrics;
use crate::models::{AccountKey, Signal};
use crate::queue::{AccountQueue, QueueError};

use super::{AuthGate, RelayError};

const ACCOUNT_FIELD: &str = "account";
const TOKEN_FIELD: &str = "token";

/// Successful enqueue response: `{ok:true, size, signalId}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnqueueReceipt {
    pub ok: bool,
    pub size: usize,
    pub signal_id: String,
    #[serde(skip)]
    pub account: AccountKey,
}

pub struct RelayService {
    auth: AuthGate,
    queue: AccountQueue,
    metrics: Option<Arc<Metrics>>,
}

impl RelayService {
    pub fn new(auth: AuthGate, queue: AccountQueue) -> Self {
        Self {
            auth,
            queue,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn queue(&self) -> &AccountQueue {
        &self.queue
    }

    /// Accept a producer body and append it to its account's queue.
    ///
    /// The body is stored verbatim as the signal payload, `token` included.
    /// The store is not touched unless the token check passes.
    pub async fn enqueue(&self, body: &[u8]) -> Result<EnqueueReceipt, RelayError> {
        let result = self.try_enqueue(body).await;
        if let (Err(e), Some(metrics)) = (&result, &self.metrics) {
            metrics
                .enqueue_rejections_total
                .with_label_values(&[e.reason()])
                .inc();
        }
        result
    }

    async fn try_enqueue(&self, body: &[u8]) -> Result<EnqueueReceipt, RelayError> {
        let payload = parse_body(body)?;

        let token = payload.get(TOKEN_FIELD).and_then(Value::as_str);
        if !self.auth.check(token) {
            return Err(RelayError::Unauthorized);
        }

        let account = resolve_account(&payload)?;
        let signal = Signal::new(payload, Utc::now());
        let signal_id = signal.signal_id().to_string();

        let size = self.queue.append(&account, signal).await.map_err(|e| {
            log_queue_error(&account, &e, "enqueue");
            RelayError::from(e)
        })?;

        if let Some(metrics) = &self.metrics {
            metrics.signals_enqueued_total.inc();
        }
        info!(account = %account, signal_id = %signal_id, size = size, "Signal enqueued");

        Ok(EnqueueReceipt {
            ok: true,
            size,
            signal_id,
            account,
        })
    }

    /// Pop the oldest signal for `account`.
    ///
    /// Store and decode failures are logged and answered with `None` so the
    /// poller always gets a well-formed empty result.
    pub async fn dequeue(&self, account: Option<&str>) -> Option<Signal> {
        let account = AccountKey::resolve(account);

        match self.queue.pop_front(&account).await {
            Ok(Some(signal)) => {
                if let Some(metrics) = &self.metrics {
                    metrics.signals_dequeued_total.inc();
                }
                info!(account = %account, signal_id = %signal.signal_id(), "Signal dequeued");
                Some(signal)
            }
            Ok(None) => None,
            Err(e) => {
                log_queue_error(&account, &e, "dequeue");
                if let Some(metrics) = &self.metrics {
                    metrics
                        .dequeue_failures_total
                        .with_label_values(&[e.kind()])
                        .inc();
                }
                None
            }
        }
    }
}

fn parse_body(body: &[u8]) -> Result<Map<String, Value>, RelayError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RelayError::InvalidInput(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
        Err(e) => Err(RelayError::InvalidInput(e.to_string())),
    }
}

fn resolve_account(payload: &Map<String, Value>) -> Result<AccountKey, RelayError> {
    match payload.get(ACCOUNT_FIELD) {
        None | Some(Value::Null) => Ok(AccountKey::default()),
        Some(Value::String(name)) => Ok(AccountKey::resolve(Some(name))),
        Some(other) => Err(RelayError::InvalidInput(format!(
            "account must be a string, got {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn log_queue_error(account: &AccountKey, e: &QueueError, operation: &'static str) {
    match e {
        QueueError::Decode(_) => error!(
            account = %account,
            key = %account.storage_key(),
            operation = operation,
            error = %e,
            "Stored queue does not decode, value left in place"
        ),
        _ => error!(
            account = %account,
            operation = operation,
            kind = e.kind(),
            error = %e,
            "Queue store operation failed"
        ),
    }
}
