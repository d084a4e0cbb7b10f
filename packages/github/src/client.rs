use reposnap_api_source::{ApiError, ApiSource};
use reposnap_github_models::{GithubErrorResponse, GithubRateLimitResponse};
use reposnap_snapshot_models::{Document, RateLimitStatus, RepositoryIdentifier};
use serde_json::Value;

const ACCEPT: &str = "application/vnd.github.v3+json";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("reposnap/", env!("CARGO_PKG_VERSION"));

pub struct GitHubSource {
    http_client: reqwest::Client,
    auth_token: Option<String>,
    base_url: String,
}

impl GitHubSource {
    /// Create a new GitHub source without authentication.
    ///
    /// # Errors
    ///
    /// * If the `reqwest::Client` fails to build
    pub fn new() -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http_client,
            auth_token: None,
            base_url: "https://api.github.com".to_string(),
        })
    }

    #[must_use]
    pub fn with_token(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        log::debug!("GET {url}");
        let mut request = self
            .http_client
            .get(url)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .query(query);

        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::debug!("GitHub API error body: {body}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_page(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<Document>, ApiError> {
        match self.get_json(url, query).await? {
            Value::Array(items) => Ok(items),
            other => Err(ApiError::Decode(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn repo_url(&self, repo: &RepositoryIdentifier) -> String {
        format!("{}/repos/{}/{}", self.base_url, repo.owner(), repo.name())
    }
}

#[async_trait::async_trait]
impl ApiSource for GitHubSource {
    async fn rate_limit(&self) -> Result<RateLimitStatus, ApiError> {
        let url = format!("{}/rate_limit", self.base_url);
        let body = self.get_json(&url, &[]).await?;

        let response: GithubRateLimitResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let core = response.resources.core;
        let reset_at = chrono::DateTime::from_timestamp(core.reset, 0)
            .ok_or_else(|| ApiError::Decode(format!("invalid reset timestamp {}", core.reset)))?;

        Ok(RateLimitStatus {
            remaining: core.remaining,
            limit: core.limit,
            reset_at,
        })
    }

    async fn repo_info(&self, repo: &RepositoryIdentifier) -> Result<Document, ApiError> {
        self.get_json(&self.repo_url(repo), &[]).await
    }

    async fn issues_page(
        &self,
        repo: &RepositoryIdentifier,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Document>, ApiError> {
        let url = format!("{}/issues", self.repo_url(repo));
        let query = [
            ("state", "all".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
            ("sort", "created".to_string()),
            ("direction", "desc".to_string()),
        ];
        self.get_page(&url, &query).await
    }

    async fn commits_page(
        &self,
        repo: &RepositoryIdentifier,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Document>, ApiError> {
        let url = format!("{}/commits", self.repo_url(repo));
        let query = [
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        self.get_page(&url, &query).await
    }

    fn source_name(&self) -> &'static str {
        "github"
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<GithubErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| "Unknown error".to_string())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
