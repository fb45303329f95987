//! Redis implementation of the link repository.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{LinkRepository, StoreError};

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::backend(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::backend(format!("Corrupt link record: {e}"))
    }
}

/// Redis repository storing each link as a JSON string under `{prefix}:{code}`.
///
/// The conditional insert is a single `SET .. NX EXAT`, so Redis both
/// enforces uniqueness and evicts the key once `expires_at` passes.
pub struct RedisLinkRepository {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisLinkRepository {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, key_prefix: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)
            .map_err(|e| StoreError::backend(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::backend(format!("Redis PING failed: {e}")))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn build_key(&self, short_code: &str) -> String {
        format!("{}:{}", self.key_prefix, short_code)
    }
}

#[async_trait]
impl LinkRepository for RedisLinkRepository {
    async fn insert_if_absent(&self, link: ShortLink) -> Result<(), StoreError> {
        let key = self.build_key(&link.short_code);
        let value = serde_json::to_string(&link)?;
        let mut conn = self.client.clone();

        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(value)
            .arg("NX")
            .arg("EXAT")
            .arg(link.expires_at.timestamp())
            .query_async(&mut conn)
            .await?;

        match reply {
            Some(_) => {
                debug!(key = %key, "Redis SET NX stored link");
                Ok(())
            }
            None => Err(StoreError::ConditionalCheckFailed),
        }
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        let Some(raw) = conn.get::<_, Option<String>>(&key).await? else {
            return Ok(None);
        };

        let link: ShortLink = serde_json::from_str(&raw)?;
        if link.is_expired() {
            return Ok(None);
        }

        Ok(Some(link))
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
