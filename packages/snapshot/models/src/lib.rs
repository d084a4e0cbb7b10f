#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Data types shared by the collector and the merger.
//!
//! Issues, commits and repository info are never inspected beyond the
//! pull request marker, so they stay opaque [`Document`]s.

mod identifier;
mod snapshot;

pub use identifier::{IdentifierError, RepositoryIdentifier};
pub use snapshot::{CombinedSnapshot, MergedDocument, RepositorySnapshot};

use chrono::{DateTime, Local, Utc};

/// An opaque structured document passed through from the API.
pub type Document = serde_json::Value;

/// Key that marks an issue-shaped item as a pull request.
pub const PULL_REQUEST_MARKER: &str = "pull_request";

/// Returns `true` if the item is a pull request rather than an issue.
#[must_use]
pub fn is_pull_request(item: &Document) -> bool {
    item.get(PULL_REQUEST_MARKER).is_some()
}

/// Snapshot of the API quota, as reported by the rate limit endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub remaining: u64,
    pub limit: u64,
    pub reset_at: DateTime<Utc>,
}

/// Wall-clock label of one run, used in every filename the run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTimestamp(DateTime<Local>);

impl RunTimestamp {
    const FORMAT: &'static str = "%Y%m%d_%H%M%S";

    #[must_use]
    pub fn now() -> Self {
        Self(Local::now())
    }

    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Local>) -> Self {
        Self(datetime)
    }
}

impl std::fmt::Display for RunTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_run_timestamp_format() {
        let datetime = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let ts = RunTimestamp::from_datetime(datetime);

        assert_eq!(ts.to_string(), "20240307_090501");
    }

    #[test]
    fn test_run_timestamp_sorts_like_its_string() {
        let earlier = RunTimestamp::from_datetime(Local.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap());
        let later = RunTimestamp::from_datetime(Local.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        assert!(earlier < later);
        assert!(earlier.to_string() < later.to_string());
    }

    #[test]
    fn test_is_pull_request() {
        let issue = serde_json::json!({ "number": 1, "title": "Bug" });
        let pr = serde_json::json!({ "number": 2, "pull_request": { "url": "https://example.com" } });
        let null_marker = serde_json::json!({ "number": 3, "pull_request": null });

        assert!(!is_pull_request(&issue));
        assert!(is_pull_request(&pr));
        assert!(is_pull_request(&null_marker));
    }
}
