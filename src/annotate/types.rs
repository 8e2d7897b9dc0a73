use crate::jira::IssueKey;

/// Log lines read by downstream consumers of the action log. Keep verbatim.
pub mod messages {
    pub const NO_ISSUE_IN_BRANCH: &str = "No Jira issue found in branch name.";
    pub const NO_ISSUE_EXITING: &str = "No Jira issue found. Exiting action.";
    pub const TITLE_ALREADY_PRESENT: &str = "Jira issue already present in the PR title.";
    pub const TITLE_UPDATED: &str = "PR title updated successfully.";
    pub const CHECKING_BODY: &str = "Checking if Jira link is present in the PR body.";
    pub const BODY_ALREADY_PRESENT: &str = "Jira link already present in the PR body.";
    pub const UPDATING_BODY: &str = "Updating PR body with Jira link.";
    pub const BODY_UPDATED: &str = "PR body updated successfully.";
    pub const MISSING_TOKEN: &str = "GITHUB_TOKEN is not set.";
    pub const NOT_PULL_REQUEST: &str = "This action must be run on a pull_request event.";
}

/// What happened to one field of the pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    AlreadyPresent,
    Updated,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The branch name carries no issue key; nothing was changed.
    NoIssue,
    Annotated {
        key: IssueKey,
        title: StepStatus,
        body: StepStatus,
    },
}

impl Outcome {
    /// Number of update calls the run issued.
    pub fn updates(&self) -> usize {
        match self {
            Outcome::NoIssue => 0,
            Outcome::Annotated { title, body, .. } => [title, body]
                .into_iter()
                .filter(|s| **s == StepStatus::Updated)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_count() {
        assert_eq!(Outcome::NoIssue.updates(), 0);
        let outcome = Outcome::Annotated {
            key: IssueKey::new("TEST-1"),
            title: StepStatus::Updated,
            body: StepStatus::AlreadyPresent,
        };
        assert_eq!(outcome.updates(), 1);
    }
}
