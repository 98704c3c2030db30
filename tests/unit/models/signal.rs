//! Unit tests for the signal record

use chrono::{TimeZone, Utc};
use serde_json::{json, Map, Value};
use signal_relay::models::{generate_signal_id, Signal};

fn payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn new_signal_stamps_id_and_receive_time() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    let signal = Signal::new(payload(json!({"symbol": "EURUSD"})), now);

    assert_eq!(signal.received_at(), 1_700_000_000_123);

    let (timestamp, suffix) = signal.signal_id().split_once('-').expect("id has a dash");
    assert_eq!(timestamp, "1700000000123");
    assert_eq!(suffix.len(), 9);
    assert!(suffix
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn system_fields_override_producer_fields() {
    let now = Utc::now();
    let signal = Signal::new(
        payload(json!({"symbol": "XAUUSD", "signalId": "spoofed", "receivedAt": 1})),
        now,
    );

    assert_ne!(signal.signal_id(), "spoofed");
    assert_eq!(signal.received_at(), now.timestamp_millis());
    assert!(signal.field("signalId").is_none());

    let record = serde_json::to_value(&signal).unwrap();
    assert_eq!(record["signalId"], json!(signal.signal_id()));
    assert_eq!(record["receivedAt"], json!(now.timestamp_millis()));
}

#[test]
fn serializes_as_flat_record() {
    let signal = Signal::new(
        payload(json!({"symbol": "EURUSD", "action": "buy", "token": "s3cret"})),
        Utc::now(),
    );

    let record = serde_json::to_value(&signal).unwrap();
    let object = record.as_object().unwrap();

    assert_eq!(object.len(), 5);
    assert_eq!(object["symbol"], "EURUSD");
    assert_eq!(object["action"], "buy");
    assert_eq!(object["token"], "s3cret");
    assert!(object.contains_key("signalId"));
    assert!(object.contains_key("receivedAt"));
    assert!(!object.contains_key("payload"));
}

#[test]
fn deserializes_payload_and_metadata() {
    let record = json!({
        "symbol": "GBPJPY",
        "lots": 0.5,
        "signalId": "1700000000000-abcdefghi",
        "receivedAt": 1_700_000_000_000_i64
    });

    let signal: Signal = serde_json::from_value(record).unwrap();
    assert_eq!(signal.signal_id(), "1700000000000-abcdefghi");
    assert_eq!(signal.received_at(), 1_700_000_000_000);
    assert_eq!(signal.payload().len(), 2);
    assert_eq!(signal.field("lots"), Some(&json!(0.5)));
}

#[test]
fn decoded_signal_round_trips_exactly() {
    let record = json!({
        "symbol": "EURUSD",
        "nested": {"signalId": "inner ids are plain payload"},
        "signalId": "1700000000000-zzzzzzzzz",
        "receivedAt": 1_700_000_000_000_i64
    });

    let signal: Signal = serde_json::from_value(record.clone()).unwrap();
    assert!(!signal.payload().contains_key("signalId"));
    assert!(!signal.payload().contains_key("receivedAt"));

    let encoded = serde_json::to_value(&signal).unwrap();
    assert_eq!(encoded, record);
    assert_eq!(serde_json::from_value::<Signal>(encoded).unwrap(), signal);
}

#[test]
fn rejects_record_without_metadata() {
    let missing_id = json!({"symbol": "EURUSD", "receivedAt": 1});
    assert!(serde_json::from_value::<Signal>(missing_id).is_err());

    let missing_time = json!({"symbol": "EURUSD", "signalId": "1-a"});
    assert!(serde_json::from_value::<Signal>(missing_time).is_err());

    let numeric_id = json!({"signalId": 5, "receivedAt": 1});
    assert!(serde_json::from_value::<Signal>(numeric_id).is_err());
}

#[test]
fn generated_ids_differ() {
    let a = generate_signal_id(42);
    let b = generate_signal_id(42);
    assert!(a.starts_with("42-"));
    assert_ne!(a, b);
}
