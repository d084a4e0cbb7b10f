use std::fmt;
use std::future::Future;
use std::time::Duration;

use reposnap_api_source::{ApiError, ApiSource};
use reposnap_config::CollectorConfig;
use reposnap_snapshot_models::{Document, RepositoryIdentifier, is_pull_request};

/// When a page marks the end of the data.
///
/// Issues and commits intentionally use different policies: issues only
/// stop on an empty page, commits also stop on a short one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationPolicy {
    /// Stop only once a page comes back empty.
    EmptyPage,
    /// Stop once a page comes back with fewer items than requested.
    ShortOrEmptyPage,
}

impl TerminationPolicy {
    /// Whether a non-empty page of `fetched` items was the last one.
    #[must_use]
    pub fn is_last_page(self, fetched: usize, per_page: u32) -> bool {
        match self {
            Self::EmptyPage => false,
            Self::ShortOrEmptyPage => fetched < per_page as usize,
        }
    }
}

/// The paginated entity types that are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Issues,
    Commits,
}

impl EntityKind {
    #[must_use]
    pub const fn termination_policy(self) -> TerminationPolicy {
        match self {
            Self::Issues => TerminationPolicy::EmptyPage,
            Self::Commits => TerminationPolicy::ShortOrEmptyPage,
        }
    }

    /// Whether an item returned by the endpoint belongs in the result.
    #[must_use]
    pub fn keeps(self, item: &Document) -> bool {
        match self {
            Self::Issues => !is_pull_request(item),
            Self::Commits => true,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Issues => "issues",
            Self::Commits => "commits",
        })
    }
}

/// Page size and pacing shared by every paginated fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub per_page: u32,
    /// Pause after each page that does not end the loop.
    pub delay: Duration,
}

impl From<&CollectorConfig> for PageSettings {
    fn from(config: &CollectorConfig) -> Self {
        Self {
            per_page: config.per_page,
            delay: config.page_delay,
        }
    }
}

/// Accumulate items from pages 1, 2, ... until `max_items` are kept, a page
/// is empty, or `kind`'s termination policy says the page was the last.
///
/// A failed page ends pagination; whatever was accumulated before it is
/// returned. The result never holds more than `max_items` items.
pub async fn paginate<F, Fut>(
    repo: &RepositoryIdentifier,
    kind: EntityKind,
    max_items: usize,
    settings: PageSettings,
    mut fetch_page: F,
) -> Vec<Document>
where
    F: FnMut(u32) -> Fut + Send,
    Fut: Future<Output = Result<Vec<Document>, ApiError>> + Send,
{
    let policy = kind.termination_policy();
    let mut items = Vec::new();
    let mut page = 1;

    while items.len() < max_items {
        let batch = match fetch_page(page).await {
            Ok(batch) => batch,
            Err(e) => {
                log::error!("Error fetching {kind} for {repo} (page {page}): {e}");
                break;
            }
        };

        if batch.is_empty() {
            log::debug!("No more {kind} for {repo} after page {}", page - 1);
            break;
        }

        let fetched = batch.len();
        let before = items.len();
        items.extend(batch.into_iter().filter(|item| kind.keeps(item)));
        log::info!(
            "Fetched {} {kind} from page {page} of {repo} ({} so far)",
            items.len() - before,
            items.len()
        );
        page += 1;

        if items.len() >= max_items || policy.is_last_page(fetched, settings.per_page) {
            break;
        }

        if !settings.delay.is_zero() {
            tokio::time::sleep(settings.delay).await;
        }
    }

    items.truncate(max_items);
    items
}

/// Up to `max_issues` issues, newest first, with pull requests dropped.
pub async fn fetch_issues(
    source: &dyn ApiSource,
    repo: &RepositoryIdentifier,
    max_issues: usize,
    settings: PageSettings,
) -> Vec<Document> {
    log::info!("Fetching issues for {repo}...");
    paginate(repo, EntityKind::Issues, max_issues, settings, move |page| {
        source.issues_page(repo, page, settings.per_page)
    })
    .await
}

/// Up to `max_commits` commits in the order the API lists them.
pub async fn fetch_commits(
    source: &dyn ApiSource,
    repo: &RepositoryIdentifier,
    max_commits: usize,
    settings: PageSettings,
) -> Vec<Document> {
    log::info!("Fetching commits for {repo}...");
    paginate(repo, EntityKind::Commits, max_commits, settings, move |page| {
        source.commits_page(repo, page, settings.per_page)
    })
    .await
}

/// Repository metadata, or `None` if the request failed.
pub async fn fetch_repo_info(source: &dyn ApiSource, repo: &RepositoryIdentifier) -> Option<Document> {
    match source.repo_info(repo).await {
        Ok(info) => Some(info),
        Err(e) => {
            log::error!("Error fetching repository info for {repo}: {e}");
            None
        }
    }
}
