#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};

/// Body of `GET /rate_limit`. Only the core bucket is read.
#[derive(Debug, Deserialize, Serialize)]
pub struct GithubRateLimitResponse {
    pub resources: GithubRateLimitResources,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GithubRateLimitResources {
    pub core: GithubRateLimitBucket,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GithubRateLimitBucket {
    pub limit: u64,
    pub remaining: u64,
    /// Unix seconds.
    pub reset: i64,
    #[serde(default)]
    pub used: Option<u64>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GithubErrorResponse {
    pub message: Option<String>,
    pub documentation_url: Option<String>,
}
