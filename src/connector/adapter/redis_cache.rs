use async_trait::async_trait;
use redis::AsyncCommands;

use crate::application::KeyValueCache;
use crate::domain::DomainError;

/// Redis-backed [`KeyValueCache`].
///
/// Opening the client only parses the URL; connections are established per
/// call through a multiplexed async connection, so a Redis that goes away
/// between calls surfaces as a per-call error rather than a poisoned
/// client.
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    pub fn connect(url: &str) -> Result<Self, DomainError> {
        let client = redis::Client::open(url)
            .map_err(|e| DomainError::cache_read(format!("invalid Redis URL {url}: {e}")))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, DomainError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| DomainError::cache_read(format!("connecting to Redis: {e}")))
    }
}

#[async_trait]
impl KeyValueCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let mut conn = self.connection().await?;
        conn.get(key)
            .await
            .map_err(|e| DomainError::cache_read(format!("GET {key}: {e}")))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| DomainError::cache_write(format!("SET {key}: {e}")))
    }
}
