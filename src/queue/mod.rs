//! Per-account FIFO queues kept as one serialized value per account
//!
//! Every mutation is a read-modify-write of the whole value: read, decode,
//! change in memory, encode, write back. The store gives no atomicity, so
//! in the default mode two concurrent writers for the same account can
//! overwrite each other (dropping a signal or resurrecting a dequeued one).
//! That is accepted for one producer and one consumer per account at
//! webhook cadence. [`AccountQueue::serialized`] closes the gap for writers
//! inside this process only.

pub mod codec;
pub mod error;

pub use error::QueueError;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::models::{AccountKey, Signal};
use crate::store::KeyValueStore;

#[derive(Default)]
struct AccountLocks {
    locks: Mutex<HashMap<AccountKey, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    async fn acquire(&self, account: &AccountKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(account.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}

pub struct AccountQueue {
    store: Arc<dyn KeyValueStore>,
    locks: Option<AccountLocks>,
}

impl AccountQueue {
    /// Unsynchronized read-modify-write, last write wins
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, locks: None }
    }

    /// Same protocol, but operations on one account are serialized within
    /// this process. Other processes sharing the store still race.
    pub fn serialized(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            locks: Some(AccountLocks::default()),
        }
    }

    pub fn is_serialized(&self) -> bool {
        self.locks.is_some()
    }

    async fn guard(&self, account: &AccountKey) -> Option<OwnedMutexGuard<()>> {
        match &self.locks {
            Some(locks) => Some(locks.acquire(account).await),
            None => None,
        }
    }

    /// Read the account's queue without modifying it
    pub async fn load(&self, account: &AccountKey) -> Result<Vec<Signal>, QueueError> {
        let current = self.store.get(&account.storage_key()).await?;
        codec::decode(current.as_deref())
    }

    /// Append `signal` at the tail and return the new queue length.
    ///
    /// A stored value that fails to decode is left untouched.
    pub async fn append(&self, account: &AccountKey, signal: Signal) -> Result<usize, QueueError> {
        let _guard = self.guard(account).await;
        let key = account.storage_key();

        let current = self.store.get(&key).await?;
        let mut queue = codec::decode(current.as_deref())?;
        queue.push(signal);

        self.store.put(&key, codec::encode(&queue)?).await?;
        debug!(account = %account, size = queue.len(), "Appended signal");
        Ok(queue.len())
    }

    /// Remove and return the head of the queue. An empty queue is not written.
    pub async fn pop_front(&self, account: &AccountKey) -> Result<Option<Signal>, QueueError> {
        let _guard = self.guard(account).await;
        let key = account.storage_key();

        let current = self.store.get(&key).await?;
        let mut queue = codec::decode(current.as_deref())?;
        if queue.is_empty() {
            return Ok(None);
        }

        let head = queue.remove(0);
        self.store.put(&key, codec::encode(&queue)?).await?;
        debug!(account = %account, remaining = queue.len(), "Popped signal");
        Ok(Some(head))
    }
}
