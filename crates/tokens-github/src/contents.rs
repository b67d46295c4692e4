use crate::repository::Repository;
use crate::{PublishError, PublishRequest, PublishResult, PublishedFile, Publisher};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("tokenforge/", env!("CARGO_PKG_VERSION"));

/// Creates or updates one file per request through `PUT /repos/{owner}/{repo}/contents/{path}`.
pub struct GitHubPublisher {
    api_base: String,
    client: reqwest::Client,
}

impl GitHubPublisher {
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Points the publisher at another API root (GitHub Enterprise, a test server).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn contents_url(&self, repo: &Repository, file_path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, repo.owner, repo.name, file_path
        )
    }

    /// Blob sha of the current file, or `None` when it does not exist yet.
    async fn existing_sha(&self, url: &str, request: &PublishRequest) -> PublishResult<Option<String>> {
        let response = self
            .client
            .get(url)
            .query(&[("ref", request.branch.as_str())])
            .header("Authorization", format!("token {}", request.token))
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "No existing file to replace");
            return Ok(None);
        }
        let body: Value = response.json().await?;
        Ok(body.get("sha").and_then(Value::as_str).map(str::to_string))
    }
}

impl Default for GitHubPublisher {
    fn default() -> Self {
        Self::new()
    }
}

/// `path/filename`, or just `filename` when `path` is empty. Surrounding slashes are dropped.
pub fn file_path(path: &str, filename: &str) -> String {
    let dir = path.trim_matches('/');
    if dir.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", dir, filename)
    }
}

pub fn commit_message(filename: &str) -> String {
    format!("Update {} from Figma plugin", filename)
}

/// JSON body of the create-or-update call.
pub fn update_body(request: &PublishRequest, sha: Option<&str>) -> Value {
    let mut body = json!({
        "message": commit_message(&request.filename),
        "content": general_purpose::STANDARD.encode(request.content.as_bytes()),
        "branch": request.branch,
    });
    if let Some(sha) = sha {
        body["sha"] = Value::String(sha.to_string());
    }
    body
}

#[async_trait]
impl Publisher for GitHubPublisher {
    fn name(&self) -> &'static str {
        "github"
    }

    #[instrument(level = "info", skip(self, request), fields(repo = %request.repo_url, branch = %request.branch, file = %request.filename))]
    async fn publish(&self, request: &PublishRequest) -> PublishResult<PublishedFile> {
        let repo = Repository::parse(&request.repo_url)?;
        let path = file_path(&request.path, &request.filename);
        let url = self.contents_url(&repo, &path);

        let sha = self.existing_sha(&url, request).await?;
        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("token {}", request.token))
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .json(&update_body(request, sha.as_deref()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            return Err(PublishError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        let html_url = body
            .pointer("/content/html_url")
            .and_then(Value::as_str)
            .map(str::to_string);
        info!(%path, created = sha.is_none(), "Pushed file to GitHub");
        Ok(PublishedFile {
            path,
            html_url,
            created: sha.is_none(),
        })
    }
}
