#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Configuration for the collector and merger.
//!
//! Values are read once at startup by the binaries and passed down
//! explicitly; nothing below this crate touches the process environment.

use std::path::PathBuf;
use std::time::Duration;

use reposnap_snapshot_models::{IdentifierError, RepositoryIdentifier};

/// Repositories both flows operate on.
pub const DEFAULT_REPOSITORIES: &[&str] = &[
    "pandas-dev/pandas",
    "numpy/numpy",
    "scikit-learn/scikit-learn",
    "apache/airflow",
    "mlflow/mlflow",
];

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_DATA_DIR: &str = "data/raw";

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const BASE_URL_ENV: &str = "GITHUB_API_URL";
pub const DATA_DIR_ENV: &str = "REPOSNAP_DATA_DIR";

/// Errors that can occur while building configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The API credential is not set.
    #[error("GITHUB_TOKEN is not set; export a GitHub token before collecting")]
    MissingToken,

    /// A configured repository identifier is malformed.
    #[error(transparent)]
    Repository(#[from] IdentifierError),
}

/// Settings shared by both flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotConfig {
    pub data_dir: PathBuf,
    pub repositories: Vec<RepositoryIdentifier>,
}

impl SnapshotConfig {
    /// # Errors
    ///
    /// * If any entry of [`DEFAULT_REPOSITORIES`] fails to parse
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            data_dir: data_dir.into(),
            repositories: default_repositories()?,
        })
    }

    /// Reads `REPOSNAP_DATA_DIR`, falling back to `data/raw`.
    ///
    /// # Errors
    ///
    /// * If any entry of [`DEFAULT_REPOSITORIES`] fails to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = non_blank_env(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        Self::new(data_dir)
    }

    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    #[must_use]
    pub fn with_repositories(mut self, repositories: Vec<RepositoryIdentifier>) -> Self {
        self.repositories = repositories;
        self
    }
}

/// Settings for a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    pub snapshot: SnapshotConfig,
    pub token: String,
    pub base_url: String,
    pub max_issues: usize,
    pub max_commits: usize,
    pub per_page: u32,
    pub page_delay: Duration,
    /// Below this many remaining requests the run does not start.
    pub preflight_threshold: u64,
    /// Below this many remaining requests no further repository is processed.
    pub continue_threshold: u64,
}

impl CollectorConfig {
    #[must_use]
    pub fn new(snapshot: SnapshotConfig, token: String) -> Self {
        Self {
            snapshot,
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_issues: 100,
            max_commits: 100,
            per_page: 100,
            page_delay: Duration::from_millis(500),
            preflight_threshold: 100,
            continue_threshold: 50,
        }
    }

    /// Reads the token from `GITHUB_TOKEN` and the optional API host from
    /// `GITHUB_API_URL`.
    ///
    /// # Errors
    ///
    /// * If `GITHUB_TOKEN` is unset or blank
    /// * If any entry of [`DEFAULT_REPOSITORIES`] fails to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = non_blank_env(TOKEN_ENV).ok_or(ConfigError::MissingToken)?;
        let snapshot = SnapshotConfig::from_env()?;

        let mut config = Self::new(snapshot, token);
        if let Some(base_url) = non_blank_env(BASE_URL_ENV) {
            log::debug!("Using API base URL {base_url}");
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_caps(mut self, max_issues: usize, max_commits: usize) -> Self {
        self.max_issues = max_issues;
        self.max_commits = max_commits;
        self
    }

    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    #[must_use]
    pub const fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    #[must_use]
    pub const fn with_thresholds(mut self, preflight: u64, continue_below: u64) -> Self {
        self.preflight_threshold = preflight;
        self.continue_threshold = continue_below;
        self
    }
}

/// Parses [`DEFAULT_REPOSITORIES`].
///
/// # Errors
///
/// * If an entry is not of the form `owner/name`
pub fn default_repositories() -> Result<Vec<RepositoryIdentifier>, ConfigError> {
    DEFAULT_REPOSITORIES
        .iter()
        .map(|value| RepositoryIdentifier::parse(value).map_err(ConfigError::from))
        .collect()
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
