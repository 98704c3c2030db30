//! Key-value store interface backing the account queues
//!
//! The store only offers whole-value get/put. There is no compare-and-swap,
//! no transaction and no listing, so callers own any read-modify-write.

pub mod memory;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
    #[error("store operation timed out")]
    Timeout,
}

#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the value stored under `key`
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}
