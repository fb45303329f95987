//! DynamoDB implementation of the link repository.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{LinkRepository, StoreError};

const SHORT_CODE: &str = "short_code";
const LONG_URL: &str = "long_url";
const CREATED_AT: &str = "created_at";
const EXPIRES_AT: &str = "expires_at";

/// DynamoDB repository keyed by `short_code`.
///
/// Timestamps are stored as epoch-second numbers so `expires_at` can be the
/// table's TTL attribute. DynamoDB deletes expired items lazily, so both the
/// conditional put and the lookup compare `expires_at` against the current
/// time themselves.
pub struct DynamoLinkRepository {
    client: Client,
    table: String,
}

impl DynamoLinkRepository {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Builds a client from the default AWS credential and region chain.
    ///
    /// `region` overrides the chain's region; `endpoint_url` points the client
    /// at a non-AWS endpoint such as DynamoDB Local.
    pub async fn connect(
        table: &str,
        region: Option<&str>,
        endpoint_url: Option<&str>,
    ) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        info!(table, region = ?sdk_config.region(), "DynamoDB client ready");
        Self::new(Client::from_conf(builder.build()), table)
    }
}

fn epoch(ts: DateTime<Utc>) -> AttributeValue {
    AttributeValue::N(ts.timestamp().to_string())
}

fn read_string(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String, StoreError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| StoreError::backend(format!("Corrupt link record: missing {name}")))
}

fn read_epoch(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<DateTime<Utc>, StoreError> {
    item.get(name)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| StoreError::backend(format!("Corrupt link record: bad {name}")))
}

fn link_from_item(item: &HashMap<String, AttributeValue>) -> Result<ShortLink, StoreError> {
    Ok(ShortLink {
        short_code: read_string(item, SHORT_CODE)?,
        long_url: read_string(item, LONG_URL)?,
        created_at: read_epoch(item, CREATED_AT)?,
        expires_at: read_epoch(item, EXPIRES_AT)?,
    })
}

#[async_trait]
impl LinkRepository for DynamoLinkRepository {
    async fn insert_if_absent(&self, link: ShortLink) -> Result<(), StoreError> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table)
            .item(SHORT_CODE, AttributeValue::S(link.short_code.clone()))
            .item(LONG_URL, AttributeValue::S(link.long_url.clone()))
            .item(CREATED_AT, epoch(link.created_at))
            .item(EXPIRES_AT, epoch(link.expires_at))
            .condition_expression("attribute_not_exists(#code) OR #expires <= :now")
            .expression_attribute_names("#code", SHORT_CODE)
            .expression_attribute_names("#expires", EXPIRES_AT)
            .expression_attribute_values(":now", epoch(link.created_at))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let collided = e
                    .as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception());
                if collided {
                    Err(StoreError::ConditionalCheckFailed)
                } else {
                    Err(StoreError::backend(DisplayErrorContext(&e)))
                }
            }
        }
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(SHORT_CODE, AttributeValue::S(short_code.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| StoreError::backend(DisplayErrorContext(&e)))?;

        let Some(item) = output.item() else {
            return Ok(None);
        };

        let link = link_from_item(item)?;
        if link.is_expired() {
            return Ok(None);
        }

        Ok(Some(link))
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn health_check(&self) -> bool {
        self.client
            .describe_table()
            .table_name(&self.table)
            .send()
            .await
            .is_ok()
    }

    fn backend(&self) -> &'static str {
        "dynamodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(pairs: &[(&str, AttributeValue)]) -> HashMap<String, AttributeValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_link_from_item() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let link = ShortLink::new("abcD1234".to_string(), "https://x.com".to_string(), created);

        let parsed = link_from_item(&item(&[
            (SHORT_CODE, AttributeValue::S("abcD1234".to_string())),
            (LONG_URL, AttributeValue::S("https://x.com".to_string())),
            (CREATED_AT, epoch(link.created_at)),
            (EXPIRES_AT, epoch(link.expires_at)),
        ]))
        .unwrap();

        assert_eq!(parsed, link);
    }

    #[test]
    fn test_link_from_item_missing_url() {
        let result = link_from_item(&item(&[
            (SHORT_CODE, AttributeValue::S("abcD1234".to_string())),
            (CREATED_AT, AttributeValue::N("1".to_string())),
            (EXPIRES_AT, AttributeValue::N("2".to_string())),
        ]));

        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[test]
    fn test_link_from_item_rejects_non_numeric_timestamp() {
        let result = link_from_item(&item(&[
            (SHORT_CODE, AttributeValue::S("abcD1234".to_string())),
            (LONG_URL, AttributeValue::S("https://x.com".to_string())),
            (CREATED_AT, AttributeValue::S("yesterday".to_string())),
            (EXPIRES_AT, AttributeValue::N("2".to_string())),
        ]));

        assert!(matches!(result, Err(StoreError::Backend(_))));
    }
}
