//! Link creation and resolution service.

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use tracing::{debug, error, info, warn};

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_well_formed};

/// Maximum number of candidate codes tried per create request.
pub const MAX_ATTEMPTS: usize = 5;

/// Service for creating and resolving short links.
///
/// Holds no mutable state. Uniqueness of codes is enforced by the
/// repository's conditional insert, so concurrent creates need no locking here.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix of returned short URLs; a trailing
    /// slash is ignored.
    pub fn new(repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Stores `long_url` under a freshly generated short code.
    ///
    /// The caller is expected to have validated `long_url` already.
    ///
    /// # Code Generation
    ///
    /// Tries up to [`MAX_ATTEMPTS`] random codes. A collision reported by the
    /// repository triggers another attempt; every other store error is
    /// returned immediately.
    ///
    /// # Errors
    ///
    /// - [`AppError::Store`] on a backend failure
    /// - [`AppError::RetriesExhausted`] if every attempt collided
    /// - [`AppError::Internal`] if the entropy source fails
    pub async fn create_short_link(&self, long_url: String) -> Result<ShortLink, AppError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code().map_err(|e| {
                AppError::internal("Failed to generate short code", Some(e.to_string()))
            })?;
            let link = ShortLink::new(code, long_url.clone(), Utc::now());

            match self.repository.insert_if_absent(link.clone()).await {
                Ok(()) => {
                    info!(
                        short_code = %link.short_code,
                        attempt,
                        backend = self.repository.backend(),
                        "Short link created"
                    );
                    counter!("links_created_total").increment(1);
                    return Ok(link);
                }
                Err(StoreError::ConditionalCheckFailed) => {
                    warn!(
                        short_code = %link.short_code,
                        attempt,
                        "Short code collision, retrying with a new code"
                    );
                    counter!("short_code_collisions_total").increment(1);
                }
                Err(e) => {
                    error!(error = %e, attempt, "Store error while creating short link");
                    return Err(e.into());
                }
            }
        }

        error!(attempts = MAX_ATTEMPTS, "Exhausted short code attempts");
        Err(AppError::retries_exhausted(
            "Could not generate a unique short code. Try again.",
        ))
    }

    /// Looks up the live link for `short_code`.
    ///
    /// Expiry is checked here as well as in the repository, so a backend whose
    /// TTL sweep lags behind still never redirects to an expired link.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `short_code` is empty
    /// - [`AppError::NotFound`] if the code never existed, has expired, or
    ///   could never have been generated (no store round-trip in that case)
    /// - [`AppError::Store`] on a backend failure
    pub async fn resolve(&self, short_code: &str) -> Result<ShortLink, AppError> {
        if short_code.is_empty() {
            return Err(AppError::bad_request("short_code is required"));
        }

        if !is_well_formed(short_code) {
            debug!(short_code, "Short code has the wrong shape, skipping lookup");
            counter!("redirects_total", "outcome" => "not_found").increment(1);
            return Err(not_found(short_code));
        }

        let found = self.repository.find_by_code(short_code).await.map_err(|e| {
            error!(error = %e, short_code, "Store error while resolving short code");
            AppError::from(e)
        })?;

        match found {
            Some(link) if !link.is_expired() => {
                counter!("redirects_total", "outcome" => "found").increment(1);
                Ok(link)
            }
            Some(_) => {
                debug!(short_code, "Short code expired");
                counter!("redirects_total", "outcome" => "expired").increment(1);
                Err(not_found(short_code))
            }
            None => {
                debug!(short_code, "Short code not found");
                counter!("redirects_total", "outcome" => "not_found").increment(1);
                Err(not_found(short_code))
            }
        }
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

    /// Removes expired links from stores without native TTL.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let removed = self.repository.purge_expired().await?;
        info!(removed, backend = self.repository.backend(), "Purged expired links");
        Ok(removed)
    }

    /// Checks if the underlying store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }

    /// Name of the configured store backend.
    pub fn backend(&self) -> &'static str {
        self.repository.backend()
    }
}

fn not_found(short_code: &str) -> AppError {
    AppError::not_found(format!("Short code '{}' not found", short_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::TimeDelta;
    use mockall::Sequence;

    fn service(mock: MockLinkRepository) -> LinkService {
        LinkService::new(Arc::new(mock), "https://s.example.com/")
    }

    fn stored_link(code: &str, url: &str) -> ShortLink {
        ShortLink::new(code.to_string(), url.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_create_short_link_success() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert_if_absent()
            .withf(|link| {
                is_well_formed(&link.short_code) && link.long_url == "https://example.com/page"
            })
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_backend().return_const("mock");

        let link = service(mock)
            .create_short_link("https://example.com/page".to_string())
            .await
            .unwrap();

        assert!(is_well_formed(&link.short_code));
        assert_eq!(link.long_url, "https://example.com/page");
        assert_eq!(link.expires_at - link.created_at, TimeDelta::days(90));
    }

    #[tokio::test]
    async fn test_create_short_link_retries_on_collision() {
        let mut mock = MockLinkRepository::new();
        let mut seq = Sequence::new();

        mock.expect_insert_if_absent()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(StoreError::ConditionalCheckFailed));
        mock.expect_insert_if_absent()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        mock.expect_backend().return_const("mock");

        let result = service(mock)
            .create_short_link("https://example.com".to_string())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_link_gives_up_after_five_attempts() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert_if_absent()
            .times(MAX_ATTEMPTS)
            .returning(|_| Err(StoreError::ConditionalCheckFailed));

        let result = service(mock)
            .create_short_link("https://example.com".to_string())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::RetriesExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_short_link_store_error_is_not_retried() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert_if_absent()
            .times(1)
            .returning(|_| Err(StoreError::backend("throughput exceeded")));

        let result = service(mock)
            .create_short_link("https://example.com".to_string())
            .await;

        match result.unwrap_err() {
            AppError::Store { detail, .. } => assert_eq!(detail, "throughput exceeded"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code()
            .withf(|code| code == "abcD1234")
            .times(1)
            .returning(|code| Ok(Some(stored_link(code, "https://example.com"))));

        let link = service(mock).resolve("abcD1234").await.unwrap();
        assert_eq!(link.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code().times(1).returning(|_| Ok(None));

        let err = service(mock).resolve("missing1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Short code 'missing1' not found");
    }

    #[tokio::test]
    async fn test_resolve_treats_expired_as_not_found() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(ShortLink::new(
                code.to_string(),
                "https://example.com".to_string(),
                Utc::now() - TimeDelta::days(91),
            )))
        });

        let err = service(mock).resolve("oldcode1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_empty_code_skips_store() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code().times(0);

        let err = service(mock).resolve("").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_store() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code().times(0);
        let service = service(mock);

        for code in ["short", "toolongcode1", "abc-1234", "ab\u{e9}12345"] {
            let err = service.resolve(code).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound { .. }), "{code}");
        }
    }

    #[tokio::test]
    async fn test_resolve_store_error() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code()
            .times(1)
            .returning(|_| Err(StoreError::backend("timeout")));

        let err = service(mock).resolve("abcD1234").await.unwrap_err();
        assert!(matches!(err, AppError::Store { .. }));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let service = service(MockLinkRepository::new());
        assert_eq!(service.short_url("abcD1234"), "https://s.example.com/abcD1234");
    }
}
