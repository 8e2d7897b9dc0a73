pub mod types;

pub use types::{Outcome, StepStatus};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Settings;
use crate::jira::{self, IssueKey, JiraError};
use crate::pr::{PrError, PullRequestClient, PullRequestRef, TriggerContext, UpdateRequest};
use types::messages;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("{}", messages::NOT_PULL_REQUEST)]
    NotPullRequest,

    #[error(transparent)]
    Jira(#[from] JiraError),

    #[error(transparent)]
    Client(#[from] PrError),
}

/// Links the triggering pull request to the Jira issue named by its branch.
///
/// At most two update calls are made, title first, each awaited before the
/// next step. Either step is skipped when an earlier run already applied it,
/// so re-running on an annotated PR issues no calls. A failed call aborts the
/// run; an update that already went through is left in place.
pub struct Annotator<'a> {
    settings: &'a Settings,
    client: &'a dyn PullRequestClient,
}

impl<'a> Annotator<'a> {
    pub fn new(settings: &'a Settings, client: &'a dyn PullRequestClient) -> Self {
        Self { settings, client }
    }

    pub async fn run(&self, context: &TriggerContext) -> Result<Outcome, AnnotateError> {
        let pr = context.pull_request().ok_or(AnnotateError::NotPullRequest)?;
        debug!(event = %context.event_name, pr = pr.number, base = %pr.base_branch, "validated trigger");

        info!("Branch name: {}", pr.head_branch);
        let key = match jira::extract_issue_key(&pr.head_branch, &self.settings.project_key_regex)? {
            Some(key) => key,
            None => {
                info!("{}", messages::NO_ISSUE_EXITING);
                return Ok(Outcome::NoIssue);
            }
        };
        info!("Extracted Jira Issue: {}", key);

        let title = self.update_title(&pr, &key).await?;
        let body = self.update_body(&pr, &key).await?;

        Ok(Outcome::Annotated { key, title, body })
    }

    async fn update_title(&self, pr: &PullRequestRef, key: &IssueKey) -> Result<StepStatus, AnnotateError> {
        info!("Current PR title: {}", pr.title);
        if jira::contains_issue_key(&pr.title, key)? {
            info!("{}", messages::TITLE_ALREADY_PRESENT);
            return Ok(StepStatus::AlreadyPresent);
        }

        let new_title = format!("{} {}", key, pr.title);
        info!("Updating PR title to: {}", new_title);
        self.client
            .update_pull_request(&UpdateRequest::title(pr, new_title))
            .await?;
        info!("{}", messages::TITLE_UPDATED);
        Ok(StepStatus::Updated)
    }

    async fn update_body(&self, pr: &PullRequestRef, key: &IssueKey) -> Result<StepStatus, AnnotateError> {
        let base_url = &self.settings.jira_base_url;
        let link = key.browse_url(base_url);
        let current_body = pr.body_or_empty();

        info!("{}", messages::CHECKING_BODY);
        if current_body.contains(&link) {
            info!("{}", messages::BODY_ALREADY_PRESENT);
            return Ok(StepStatus::AlreadyPresent);
        }

        let new_body = format!("{}\n\n{}", key.markdown_link(base_url), current_body);
        info!("{}", messages::UPDATING_BODY);
        self.client
            .update_pull_request(&UpdateRequest::body(pr, new_body))
            .await?;
        info!("{}", messages::BODY_UPDATED);
        Ok(StepStatus::Updated)
    }
}
