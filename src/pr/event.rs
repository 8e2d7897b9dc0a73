use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::types::{PullRequestRef, RepoRef};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Failed to read event payload: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse event payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid repository '{0}', expected owner/repo")]
    InvalidRepository(String),

    #[error("Repository could not be determined from the environment or the event payload")]
    MissingRepository,
}

/// The subset of a GitHub webhook payload the linker reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    pub pull_request: Option<PullRequestPayload>,
    pub repository: Option<RepositoryPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub head: BranchPayload,
    pub base: BranchPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchPayload {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    pub name: String,
    pub owner: OwnerPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    pub login: String,
}

/// Everything known about the event that triggered this run.
#[derive(Debug, Clone)]
pub struct TriggerContext {
    pub event_name: String,
    pub repo: RepoRef,
    pub payload: EventPayload,
}

impl TriggerContext {
    /// Load the context from an event payload file.
    ///
    /// `repository` is the `owner/repo` string exported by the runner; when
    /// absent the payload's `repository` object is used instead.
    pub fn load(
        event_path: &Path,
        event_name: &str,
        repository: Option<&str>,
    ) -> Result<TriggerContext, ContextError> {
        debug!(path = %event_path.display(), "reading event payload");
        let raw = std::fs::read_to_string(event_path)?;
        Self::from_json(&raw, event_name, repository)
    }

    pub fn from_json(
        raw: &str,
        event_name: &str,
        repository: Option<&str>,
    ) -> Result<TriggerContext, ContextError> {
        let payload: EventPayload = serde_json::from_str(raw)?;
        let repo = match repository {
            Some(full_name) => parse_repository(full_name)?,
            None => payload
                .repository
                .as_ref()
                .map(|r| RepoRef {
                    owner: r.owner.login.clone(),
                    repo: r.name.clone(),
                })
                .ok_or(ContextError::MissingRepository)?,
        };
        debug!(event = event_name, owner = %repo.owner, repo = %repo.repo, "loaded trigger context");

        Ok(TriggerContext {
            event_name: event_name.to_string(),
            repo,
            payload,
        })
    }

    /// The triggering pull request, if the payload carries one.
    pub fn pull_request(&self) -> Option<PullRequestRef> {
        self.payload.pull_request.as_ref().map(|pr| PullRequestRef {
            number: pr.number,
            title: pr.title.clone(),
            body: pr.body.clone(),
            head_branch: pr.head.ref_name.clone(),
            base_branch: pr.base.ref_name.clone(),
            repo: self.repo.clone(),
        })
    }
}

/// Split an `owner/repo` string.
pub fn parse_repository(full_name: &str) -> Result<RepoRef, ContextError> {
    match full_name.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok(RepoRef {
                owner: owner.to_string(),
                repo: repo.to_string(),
            })
        }
        _ => Err(ContextError::InvalidRepository(full_name.to_string())),
    }
}
