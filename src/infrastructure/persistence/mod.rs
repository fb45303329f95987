//! Link repository implementations.
//!
//! - [`MemoryLinkRepository`] - In-process map, for local runs and tests
//! - [`PgLinkRepository`] - PostgreSQL table via SQLx
//! - [`RedisLinkRepository`] - Redis keys with native expiry
//! - [`DynamoLinkRepository`] - DynamoDB table with a TTL attribute
//!
//! [`connect`] builds the one selected by [`StoreConfig`].

pub mod dynamo_link_repository;
pub mod memory_link_repository;
pub mod pg_link_repository;
pub mod redis_link_repository;

pub use dynamo_link_repository::DynamoLinkRepository;
pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
pub use redis_link_repository::RedisLinkRepository;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, StoreConfig};
use crate::domain::repositories::LinkRepository;

/// Connects to the store selected in `config`.
///
/// Called once per process; the returned handle is shared by every request.
///
/// # Errors
///
/// Returns an error if the store cannot be reached or its schema cannot be
/// prepared.
pub async fn connect(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    let repository: Arc<dyn LinkRepository> = match &config.store {
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store; links are lost on restart");
            Arc::new(MemoryLinkRepository::new())
        }
        StoreConfig::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(database_url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            tracing::info!("Connected to database");

            let repository = PgLinkRepository::new(Arc::new(pool), config.table_name.clone());
            repository
                .ensure_schema()
                .await
                .context("Failed to prepare links table")?;
            Arc::new(repository)
        }
        StoreConfig::Redis { redis_url } => Arc::new(
            RedisLinkRepository::connect(redis_url, &config.table_name)
                .await
                .context("Failed to connect to Redis")?,
        ),
        StoreConfig::DynamoDb {
            region,
            endpoint_url,
        } => Arc::new(
            DynamoLinkRepository::connect(
                &config.table_name,
                region.as_deref(),
                endpoint_url.as_deref(),
            )
            .await,
        ),
    };

    Ok(repository)
}
