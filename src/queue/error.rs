use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored queue is corrupted: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode queue: {0}")]
    Encode(#[source] serde_json::Error),
}

impl QueueError {
    /// Short label used for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            QueueError::Store(_) => "store",
            QueueError::Decode(_) => "decode",
            QueueError::Encode(_) => "encode",
        }
    }
}
