//! Stored form of an account queue: a JSON array of signal records

use crate::models::Signal;

use super::QueueError;

/// Decode a stored queue value. An absent value is an empty queue; bytes that
/// do not parse are an error, never an empty queue.
pub fn decode(bytes: Option<&[u8]>) -> Result<Vec<Signal>, QueueError> {
    match bytes {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_slice(raw).map_err(QueueError::Decode),
    }
}

pub fn encode(signals: &[Signal]) -> Result<Vec<u8>, QueueError> {
    serde_json::to_vec(signals).map_err(QueueError::Encode)
}
