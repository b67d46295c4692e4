use async_trait::async_trait;
use thiserror::Error;

pub mod contents;
pub mod repository;

pub use contents::GitHubPublisher;
pub use repository::Repository;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Invalid GitHub repository URL: {0}")]
    InvalidRepositoryUrl(String),
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type PublishResult<T> = Result<T, PublishError>;

/// One file to create or update on a branch.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    pub repo_url: String,
    pub token: String,
    pub branch: String,
    /// Directory inside the repository; empty for the root.
    pub path: String,
    pub content: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedFile {
    /// Repository-relative path that was written.
    pub path: String,
    /// Link to the file on the web, when the API returned one.
    pub html_url: Option<String>,
    /// `false` when an existing file was replaced.
    pub created: bool,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Creates or replaces the file described by `request`.
    async fn publish(&self, request: &PublishRequest) -> PublishResult<PublishedFile>;

    /// Returns the publisher name (e.g., "github").
    fn name(&self) -> &'static str;
}
