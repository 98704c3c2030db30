//! Relayed signal record

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SIGNAL_ID_FIELD: &str = "signalId";
pub const RECEIVED_AT_FIELD: &str = "receivedAt";

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One relayed message: the producer's body plus the id and receive time
/// assigned on enqueue.
///
/// Serialized as a single flat object, the payload fields followed by
/// `signalId` and `receivedAt`. Built only through [`Signal::new`] or
/// deserialization, so the payload never carries either reserved key and
/// encoding round-trips exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Map<String, Value>", try_from = "Map<String, Value>")]
pub struct Signal {
    payload: Map<String, Value>,
    signal_id: String,
    received_at: i64,
}

impl Signal {
    /// Wrap a producer payload, stamping it with a fresh id and `now`.
    ///
    /// Producer-supplied `signalId`/`receivedAt` fields are dropped; the
    /// system-assigned values always win.
    pub fn new(mut payload: Map<String, Value>, now: DateTime<Utc>) -> Self {
        payload.remove(SIGNAL_ID_FIELD);
        payload.remove(RECEIVED_AT_FIELD);

        let received_at = now.timestamp_millis();
        Self {
            payload,
            signal_id: generate_signal_id(received_at),
            received_at,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// Producer fields, without `signalId`/`receivedAt`
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn signal_id(&self) -> &str {
        &self.signal_id
    }

    /// Epoch milliseconds
    pub fn received_at(&self) -> i64 {
        self.received_at
    }
}

/// `<epoch-millis>-<9 lowercase base36 chars>`
pub fn generate_signal_id(timestamp_ms: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", timestamp_ms, suffix)
}

impl From<Signal> for Map<String, Value> {
    fn from(signal: Signal) -> Self {
        let mut record = signal.payload;
        record.insert(SIGNAL_ID_FIELD.to_string(), Value::String(signal.signal_id));
        record.insert(
            RECEIVED_AT_FIELD.to_string(),
            Value::Number(signal.received_at.into()),
        );
        record
    }
}

impl TryFrom<Map<String, Value>> for Signal {
    type Error = String;

    fn try_from(mut record: Map<String, Value>) -> Result<Self, Self::Error> {
        let signal_id = match record.remove(SIGNAL_ID_FIELD) {
            Some(Value::String(id)) => id,
            Some(other) => return Err(format!("signalId must be a string, got {}", other)),
            None => return Err("missing signalId".to_string()),
        };
        let received_at = match record.remove(RECEIVED_AT_FIELD) {
            Some(value) => value
                .as_i64()
                .ok_or_else(|| format!("receivedAt must be an integer, got {}", value))?,
            None => return Err("missing receivedAt".to_string()),
        };

        Ok(Self {
            payload: record,
            signal_id,
            received_at,
        })
    }
}
