use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use reposnap_api_source::{ApiError, ApiSource};
use reposnap_snapshot_models::{Document, RateLimitStatus, RepositoryIdentifier};

type Page = Result<Vec<Document>, ApiError>;

/// In-memory API with scripted responses. Pages past the end of a script
/// are empty; rate limit checks past the end of the queue report 5000.
#[derive(Default)]
pub struct ScriptedSource {
    rate_limits: Mutex<VecDeque<Result<u64, ApiError>>>,
    info: HashMap<String, Result<Document, ApiError>>,
    issues: HashMap<String, Vec<Page>>,
    commits: HashMap<String, Vec<Page>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate_limits(self, remaining: impl IntoIterator<Item = Result<u64, ApiError>>) -> Self {
        self.rate_limits.lock().unwrap().extend(remaining);
        self
    }

    pub fn with_info(mut self, repo: &str, info: Result<Document, ApiError>) -> Self {
        self.info.insert(repo.to_string(), info);
        self
    }

    pub fn with_issue_pages(mut self, repo: &str, pages: Vec<Page>) -> Self {
        self.issues.insert(repo.to_string(), pages);
        self
    }

    pub fn with_commit_pages(mut self, repo: &str, pages: Vec<Page>) -> Self {
        self.commits.insert(repo.to_string(), pages);
        self
    }

    /// Requests made so far, e.g. `"issues numpy/numpy 2"`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }

    fn page(pages: Option<&Vec<Page>>, page: u32) -> Page {
        pages
            .and_then(|pages| pages.get(page as usize - 1).cloned())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait::async_trait]
impl ApiSource for ScriptedSource {
    async fn rate_limit(&self) -> Result<RateLimitStatus, ApiError> {
        self.record("rate_limit".to_string());
        let remaining = self.rate_limits.lock().unwrap().pop_front().unwrap_or(Ok(5000))?;
        Ok(RateLimitStatus {
            remaining,
            limit: 5000,
            reset_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        })
    }

    async fn repo_info(&self, repo: &RepositoryIdentifier) -> Result<Document, ApiError> {
        self.record(format!("info {repo}"));
        self.info
            .get(repo.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(serde_json::json!({ "full_name": repo.as_str() })))
    }

    async fn issues_page(
        &self,
        repo: &RepositoryIdentifier,
        page: u32,
        _per_page: u32,
    ) -> Result<Vec<Document>, ApiError> {
        self.record(format!("issues {repo} {page}"));
        Self::page(self.issues.get(repo.as_str()), page)
    }

    async fn commits_page(
        &self,
        repo: &RepositoryIdentifier,
        page: u32,
        _per_page: u32,
    ) -> Result<Vec<Document>, ApiError> {
        self.record(format!("commits {repo} {page}"));
        Self::page(self.commits.get(repo.as_str()), page)
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

pub fn issues(range: std::ops::Range<u64>) -> Vec<Document> {
    range
        .map(|number| serde_json::json!({ "number": number, "title": format!("Issue {number}") }))
        .collect()
}

pub fn pull_requests(range: std::ops::Range<u64>) -> Vec<Document> {
    range
        .map(|number| {
            serde_json::json!({
                "number": number,
                "title": format!("PR {number}"),
                "pull_request": { "url": format!("https://api.github.com/pulls/{number}") }
            })
        })
        .collect()
}

pub fn commits(range: std::ops::Range<u64>) -> Vec<Document> {
    range
        .map(|n| serde_json::json!({ "sha": format!("{n:040x}") }))
        .collect()
}
