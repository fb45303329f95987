//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{LinkRepository, StoreError};

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::backend(e)
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    short_code: String,
    long_url: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<LinkRow> for ShortLink {
    fn from(row: LinkRow) -> Self {
        ShortLink {
            short_code: row.short_code,
            long_url: row.long_url,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// PostgreSQL repository storing links in a single table.
///
/// The table name comes from configuration and is validated as a plain SQL
/// identifier before it reaches this type, so queries are built at runtime
/// with bound parameters for every value.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    table: String,
}

impl PgLinkRepository {
    /// Creates a new repository over an existing pool.
    pub fn new(pool: Arc<PgPool>, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Creates the links table and its expiry index if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let table = &self.table;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                short_code TEXT PRIMARY KEY,
                long_url   TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL
            )
            "#
        ))
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS {table}_expires_at_idx ON {table} (expires_at)"
        ))
        .execute(self.pool.as_ref())
        .await?;

        info!(table = %self.table, "PostgreSQL schema ready");
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_if_absent(&self, link: ShortLink) -> Result<(), StoreError> {
        let table = &self.table;

        // A conflicting row is only overwritten once it has expired.
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO {table} (short_code, long_url, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (short_code) DO UPDATE
                SET long_url = EXCLUDED.long_url,
                    created_at = EXCLUDED.created_at,
                    expires_at = EXCLUDED.expires_at
                WHERE {table}.expires_at <= EXCLUDED.created_at
            "#
        ))
        .bind(&link.short_code)
        .bind(&link.long_url)
        .bind(link.created_at)
        .bind(link.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ConditionalCheckFailed);
        }

        Ok(())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        let table = &self.table;

        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT short_code, long_url, created_at, expires_at
            FROM {table}
            WHERE short_code = $1 AND expires_at > NOW()
            "#
        ))
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let table = &self.table;

        let result = sqlx::query(&format!("DELETE FROM {table} WHERE expires_at <= NOW()"))
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
