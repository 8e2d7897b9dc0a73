pub mod event;
pub mod types;

pub use event::TriggerContext;
pub use types::{PullRequestRef, UpdateRequest};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Error)]
pub enum PrError {
    /// GitHub rejected the request; carries the API's own message.
    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Capability to mutate a pull request on the hosting platform.
#[async_trait]
pub trait PullRequestClient: Send + Sync {
    /// Patch the fields set in `request`. Attempted exactly once.
    async fn update_pull_request(&self, request: &UpdateRequest) -> Result<(), PrError>;
}

/// `PullRequestClient` backed by the GitHub REST API.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn pull_url(&self, request: &UpdateRequest) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_url, request.owner, request.repo, request.pull_number
        )
    }
}

#[async_trait]
impl PullRequestClient for GitHubClient {
    #[instrument(skip(self, request), fields(owner = %request.owner, repo = %request.repo, pr = request.pull_number))]
    async fn update_pull_request(&self, request: &UpdateRequest) -> Result<(), PrError> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            message: String,
        }

        debug!(
            title = request.title.is_some(),
            body = request.body.is_some(),
            "patching pull request"
        );
        let response = self
            .client
            .patch(self.pull_url(request))
            .header("User-Agent", "pr-jira-linker")
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .json(&request.fields())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "pull request updated");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("HTTP {}", status));
        debug!(status = status.as_u16(), %message, "GitHub rejected update");
        Err(PrError::Api(message))
    }
}

#[cfg(test)]
mod tests {
    use super::types::RepoRef;
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_pr() -> PullRequestRef {
        PullRequestRef {
            number: 1,
            title: "Update README".to_string(),
            body: Some("This is a test PR.".to_string()),
            head_branch: "TEST-123-feature-update".to_string(),
            base_branch: "main".to_string(),
            repo: RepoRef {
                owner: "test-owner".to_string(),
                repo: "test-repo".to_string(),
            },
        }
    }

    #[test]
    fn test_pull_url_strips_trailing_slash() {
        let client = GitHubClient::new("token", "https://ghe.example.com/api/v3/");
        let request = UpdateRequest::title(&sample_pr(), "x".to_string());
        assert_eq!(
            client.pull_url(&request),
            "https://ghe.example.com/api/v3/repos/test-owner/test-repo/pulls/1"
        );
    }

    #[tokio::test]
    async fn test_update_title_sends_patch() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/repos/test-owner/test-repo/pulls/1"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(serde_json::json!({ "title": "TEST-123 Update README" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "number": 1 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new("test-token", server.uri());
        let request = UpdateRequest::title(&sample_pr(), "TEST-123 Update README".to_string());
        client.update_pull_request(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_body_sends_only_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/repos/test-owner/test-repo/pulls/1"))
            .and(body_json(serde_json::json!({ "body": "new body" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new("test-token", server.uri());
        let request = UpdateRequest::body(&sample_pr(), "new body".to_string());
        client.update_pull_request(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({ "message": "Resource not accessible by integration" })),
            )
            .mount(&server)
            .await;

        let client = GitHubClient::new("test-token", server.uri());
        let request = UpdateRequest::title(&sample_pr(), "x".to_string());
        let err = client.update_pull_request(&request).await.unwrap_err();
        assert!(matches!(err, PrError::Api(_)));
        assert_eq!(err.to_string(), "Resource not accessible by integration");
    }

    #[tokio::test]
    async fn test_api_error_without_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = GitHubClient::new("test-token", server.uri());
        let request = UpdateRequest::body(&sample_pr(), "x".to_string());
        let err = client.update_pull_request(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");
    }
}
