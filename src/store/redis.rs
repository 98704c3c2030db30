//! Redis-backed store using plain GET/SET

use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::time::timeout;

use super::{KeyValueStore, StoreError};

const REDIS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub struct RedisStore {
    connection_manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis at `url`
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the initial connection fails.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url).map_err(|e| StoreError::Backend(e.to_string()))?;
        let connection_manager = timeout(REDIS_TIMEOUT, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout)?
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self { connection_manager })
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.connection_manager.clone();
        timeout(REDIS_TIMEOUT, conn.get::<_, Option<Vec<u8>>>(key))
            .await
            .map_err(|_| StoreError::Timeout)?
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut conn = self.connection_manager.clone();
        timeout(REDIS_TIMEOUT, conn.set::<_, _, ()>(key, value))
            .await
            .map_err(|_| StoreError::Timeout)?
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
