use serde::Serialize;

/// The pull request that triggered the run, as seen in the event payload.
#[derive(Debug, Clone)]
pub struct PullRequestRef {
    /// PR number (e.g., 42)
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR description; GitHub sends `null` for an empty description
    pub body: Option<String>,
    /// Source branch name (`head.ref`)
    pub head_branch: String,
    /// Target branch name (`base.ref`)
    pub base_branch: String,
    /// Repository the PR lives in
    pub repo: RepoRef,
}

impl PullRequestRef {
    /// Body with absence normalised to the empty string.
    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// Owner login and repository name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

/// Fields for one `PATCH /repos/{owner}/{repo}/pulls/{number}` call.
///
/// Only the fields that are `Some` are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub owner: String,
    pub repo: String,
    pub pull_number: u64,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl UpdateRequest {
    pub fn title(pr: &PullRequestRef, title: String) -> Self {
        Self {
            owner: pr.repo.owner.clone(),
            repo: pr.repo.repo.clone(),
            pull_number: pr.number,
            title: Some(title),
            body: None,
        }
    }

    pub fn body(pr: &PullRequestRef, body: String) -> Self {
        Self {
            owner: pr.repo.owner.clone(),
            repo: pr.repo.repo.clone(),
            pull_number: pr.number,
            title: None,
            body: Some(body),
        }
    }

    /// JSON payload for the GitHub API.
    pub fn fields(&self) -> UpdateFields<'_> {
        UpdateFields {
            title: self.title.as_deref(),
            body: self.body.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'a str>,
}
