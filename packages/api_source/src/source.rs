use reposnap_snapshot_models::{Document, RateLimitStatus, RepositoryIdentifier};

/// Reason a single API request produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body was not the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

#[async_trait::async_trait]
pub trait ApiSource: Send + Sync {
    async fn rate_limit(&self) -> Result<RateLimitStatus, ApiError>;

    async fn repo_info(&self, repo: &RepositoryIdentifier) -> Result<Document, ApiError>;

    /// One page of issues, newest first. Pull requests are included as the
    /// API returns them.
    async fn issues_page(
        &self,
        repo: &RepositoryIdentifier,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Document>, ApiError>;

    async fn commits_page(
        &self,
        repo: &RepositoryIdentifier,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Document>, ApiError>;

    fn source_name(&self) -> &str;
}
