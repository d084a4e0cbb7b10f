#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Issue and commit collection for `reposnap`.
//!
//! A collection run walks the configured repositories one at a time,
//! paginating each endpoint up to its cap and writing one snapshot file
//! per repository plus a combined file for the whole run.

mod collector;
mod pagination;
mod rate_limit;

pub use collector::{
    CollectionOutcome, CollectionReport, Collector, CollectorError, RepositorySummary,
};
pub use pagination::{
    EntityKind, PageSettings, TerminationPolicy, fetch_commits, fetch_issues, fetch_repo_info,
    paginate,
};
pub use rate_limit::check_rate_limit;
