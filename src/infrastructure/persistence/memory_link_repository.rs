//! In-process implementation of the link repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{LinkRepository, StoreError};

/// Thread-safe map from short code to link.
///
/// The conditional insert goes through the `DashMap` entry API, which holds
/// the shard lock for the key while checking and writing. Expired entries are
/// evicted lazily on lookup and by [`LinkRepository::purge_expired`].
///
/// # Use Cases
///
/// - Local development without an external store
/// - Integration tests of the HTTP layer
#[derive(Clone, Debug, Default)]
pub struct MemoryLinkRepository {
    links: Arc<DashMap<String, ShortLink>>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert_if_absent(&self, link: ShortLink) -> Result<(), StoreError> {
        match self.links.entry(link.short_code.clone()) {
            Entry::Occupied(mut existing) => {
                if !existing.get().is_expired_at(link.created_at) {
                    return Err(StoreError::ConditionalCheckFailed);
                }
                debug!(short_code = %link.short_code, "Replacing expired link");
                existing.insert(link);
            }
            Entry::Vacant(slot) => {
                slot.insert(link);
            }
        }
        Ok(())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        let now = Utc::now();
        let found = self.links.get(short_code).map(|entry| entry.value().clone());

        match found {
            Some(link) if link.is_expired_at(now) => {
                self.links
                    .remove_if(short_code, |_, stored| stored.is_expired_at(now));
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let now = Utc::now();
        let before = self.links.len();
        self.links.retain(|_, link| !link.is_expired_at(now));
        Ok((before.saturating_sub(self.links.len())) as u64)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
