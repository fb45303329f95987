//! Repository trait for short link storage.

use crate::domain::entities::ShortLink;
use async_trait::async_trait;

/// Errors reported by a [`LinkRepository`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The conditional write failed because the short code is already taken.
    #[error("short code already exists")]
    ConditionalCheckFailed,

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl std::fmt::Display) -> Self {
        Self::Backend(message.to_string())
    }
}

/// Key-value store for short links, keyed by short code.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process map
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL table
/// - [`crate::infrastructure::persistence::RedisLinkRepository`] - Redis keys with native TTL
/// - [`crate::infrastructure::persistence::DynamoLinkRepository`] - DynamoDB table with native TTL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Atomically stores `link` unless its short code is already present.
    ///
    /// A record whose `expires_at` has passed counts as absent and is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConditionalCheckFailed`] if a live record already
    /// uses the short code, [`StoreError::Backend`] on any other failure.
    async fn insert_if_absent(&self, link: ShortLink) -> Result<(), StoreError>;

    /// Finds a live link by its short code.
    ///
    /// Expired records are never returned, even if the backend has not
    /// evicted them yet.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Removes expired records and returns how many were deleted.
    ///
    /// Backends with native TTL eviction return `Ok(0)`.
    async fn purge_expired(&self) -> Result<u64, StoreError>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name used in logs and health reports.
    fn backend(&self) -> &'static str;
}
