use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use reposnap_api_source::ApiSource;
use reposnap_config::CollectorConfig;
use reposnap_snapshot_models::{
    CombinedSnapshot, RepositoryIdentifier, RepositorySnapshot, RunTimestamp,
};
use reposnap_store::{SnapshotStore, SnapshotStoreError, combined_filename, repository_filename};

use crate::pagination::{PageSettings, fetch_commits, fetch_issues, fetch_repo_info};
use crate::rate_limit::check_rate_limit;

/// Errors that end a collection run.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error(transparent)]
    Store(#[from] SnapshotStoreError),
}

/// How a collection run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// Every configured repository was processed.
    Completed,
    /// The quota ran low after a repository; the rest were skipped.
    StoppedEarly {
        remaining: u64,
        skipped: Vec<RepositoryIdentifier>,
    },
    /// The quota was too low to start. Nothing was written.
    Aborted { remaining: u64 },
}

/// Counts collected for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    pub repository: RepositoryIdentifier,
    pub has_info: bool,
    pub issues: usize,
    pub commits: usize,
}

impl From<&RepositorySnapshot> for RepositorySummary {
    fn from(snapshot: &RepositorySnapshot) -> Self {
        Self {
            repository: snapshot.repository.clone(),
            has_info: snapshot.info.is_some(),
            issues: snapshot.issues.len(),
            commits: snapshot.commits.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub run: RunTimestamp,
    pub outcome: CollectionOutcome,
    pub summaries: Vec<RepositorySummary>,
    /// Files written, per-repository snapshots first and the combined
    /// snapshot last.
    pub written: Vec<PathBuf>,
}

pub struct Collector {
    source: Arc<dyn ApiSource>,
    config: CollectorConfig,
    store: SnapshotStore,
}

impl Collector {
    #[must_use]
    pub fn new(source: Arc<dyn ApiSource>, config: CollectorConfig) -> Self {
        let store = SnapshotStore::new(config.snapshot.data_dir.clone());
        Self {
            source,
            config,
            store,
        }
    }

    /// Collect every configured repository, labeling files with the current
    /// time.
    ///
    /// # Errors
    ///
    /// * If a snapshot file cannot be written
    pub async fn run(&self) -> Result<CollectionReport, CollectorError> {
        self.run_at(RunTimestamp::now()).await
    }

    /// Collect every configured repository, labeling files with `run`.
    ///
    /// # Errors
    ///
    /// * If a snapshot file cannot be written
    pub async fn run_at(&self, run: RunTimestamp) -> Result<CollectionReport, CollectorError> {
        let remaining = check_rate_limit(self.source.as_ref()).await;
        if remaining < self.config.preflight_threshold {
            log::warn!(
                "Low rate limit remaining ({remaining} < {}). Consider waiting.",
                self.config.preflight_threshold
            );
            return Ok(CollectionReport {
                run,
                outcome: CollectionOutcome::Aborted { remaining },
                summaries: Vec::new(),
                written: Vec::new(),
            });
        }

        let repositories = &self.config.snapshot.repositories;
        let mut combined = CombinedSnapshot::new();
        let mut written = Vec::with_capacity(repositories.len() + 1);
        let mut outcome = CollectionOutcome::Completed;

        for (index, repo) in repositories.iter().enumerate() {
            log::info!("Processing: {repo}");

            let snapshot = self.collect_repository(repo).await;
            written.push(
                self.store
                    .save(&snapshot, &repository_filename(repo, &run))?,
            );
            combined.insert(snapshot);

            let remaining = check_rate_limit(self.source.as_ref()).await;
            if remaining < self.config.continue_threshold {
                let skipped = repositories[index + 1..].to_vec();
                if !skipped.is_empty() {
                    log::warn!(
                        "Low rate limit ({remaining} remaining). Stopping before {} more repositories.",
                        skipped.len()
                    );
                    outcome = CollectionOutcome::StoppedEarly { remaining, skipped };
                }
                break;
            }
        }

        written.push(self.store.save(&combined, &combined_filename(&run))?);
        log::info!("Data collection complete");

        Ok(CollectionReport {
            run,
            outcome,
            summaries: combined.iter().map(RepositorySummary::from).collect(),
            written,
        })
    }

    async fn collect_repository(&self, repo: &RepositoryIdentifier) -> RepositorySnapshot {
        let source = self.source.as_ref();
        let settings = PageSettings::from(&self.config);

        let mut snapshot = RepositorySnapshot::new(repo.clone(), Utc::now());
        snapshot.info = fetch_repo_info(source, repo).await;
        snapshot.issues = fetch_issues(source, repo, self.config.max_issues, settings).await;
        snapshot.commits = fetch_commits(source, repo, self.config.max_commits, settings).await;
        snapshot
    }
}
