pub mod types;

pub use types::IssueKey;

use regex::RegexBuilder;
use thiserror::Error;
use tracing::{debug, info};

use crate::annotate::types::messages;

#[derive(Debug, Error)]
pub enum JiraError {
    #[error("{0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Extract the first issue key from a branch name.
///
/// `project_key_pattern` is a regex fragment describing the project part of
/// the key; it is combined into `(<fragment>-[0-9]+)`, matched
/// case-insensitively anywhere in the branch. The leftmost match wins and is
/// returned uppercased. `Ok(None)` means no key was found.
pub fn extract_issue_key(
    branch_name: &str,
    project_key_pattern: &str,
) -> Result<Option<IssueKey>, JiraError> {
    let pattern = RegexBuilder::new(&format!("({}-[0-9]+)", project_key_pattern))
        .case_insensitive(true)
        .build()?;

    match pattern.captures(branch_name).and_then(|caps| caps.get(1)) {
        Some(found) => {
            debug!(matched = found.as_str(), "matched issue key in branch");
            Ok(Some(IssueKey::new(found.as_str())))
        }
        None => {
            info!("{}", messages::NO_ISSUE_IN_BRANCH);
            Ok(None)
        }
    }
}

/// Whether `text` contains `key` as a whole word, ignoring case.
///
/// Word boundaries are ASCII: a non-ASCII letter next to the key does not
/// join it into a longer word.
pub fn contains_issue_key(text: &str, key: &IssueKey) -> Result<bool, JiraError> {
    let pattern = RegexBuilder::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(key.as_str())))
        .case_insensitive(true)
        .build()?;
    Ok(pattern.is_match(text))
}
