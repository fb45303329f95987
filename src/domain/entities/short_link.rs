//! ShortLink entity representing a short code to long URL mapping.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Fixed lifetime of every link, in days.
pub const LINK_TTL_DAYS: i64 = 90;

/// A short code mapped to its destination.
///
/// Records are created once and never updated. Timestamps are kept in whole
/// seconds so they survive a round trip through stores that keep Unix epochs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub short_code: String,
    pub long_url: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a link that expires [`LINK_TTL_DAYS`] after `created_at`.
    pub fn new(short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        let created_at = created_at.trunc_subsecs(0);
        Self {
            short_code,
            long_url,
            created_at,
            expires_at: created_at + TimeDelta::days(LINK_TTL_DAYS),
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if the link is expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Human readable lifetime reported to API callers.
    pub fn expires_in() -> String {
        format!("{} days", LINK_TTL_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_link_expires_after_ninety_days() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let link = ShortLink::new(
            "abcD1234".to_string(),
            "https://example.com".to_string(),
            created,
        );

        assert_eq!(link.created_at, created);
        assert_eq!(
            link.expires_at,
            Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_new_link_truncates_subseconds() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + TimeDelta::milliseconds(750);
        let link = ShortLink::new("code".to_string(), "https://x.com".to_string(), created);

        assert_eq!(link.created_at.timestamp_subsec_nanos(), 0);
        assert_eq!(link.expires_at.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_fresh_link_is_not_expired() {
        let link = ShortLink::new("code".to_string(), "https://x.com".to_string(), Utc::now());
        assert!(!link.is_expired());
    }

    #[test]
    fn test_link_is_expired_at_boundary() {
        let link = ShortLink::new("code".to_string(), "https://x.com".to_string(), Utc::now());

        assert!(!link.is_expired_at(link.expires_at - TimeDelta::seconds(1)));
        assert!(link.is_expired_at(link.expires_at));
    }

    #[test]
    fn test_serializes_timestamps_as_epoch_seconds() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let link = ShortLink::new("code".to_string(), "https://x.com".to_string(), created);

        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["created_at"], 1_704_067_200);
        assert_eq!(value["expires_at"], 1_704_067_200 + 90 * 86_400);
    }

    #[test]
    fn test_expires_in_label() {
        assert_eq!(ShortLink::expires_in(), "90 days");
    }
}
