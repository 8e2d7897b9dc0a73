use std::fmt;

/// A Jira issue key such as `PROJ-123`, always stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueKey(String);

impl IssueKey {
    /// Wrap a matched key, normalising it to uppercase.
    pub fn new(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical browse link: `<base_url>/browse/<KEY>`.
    ///
    /// The base URL is used verbatim so links written by earlier runs keep
    /// matching the presence check.
    pub fn browse_url(&self, base_url: &str) -> String {
        format!("{}/browse/{}", base_url, self.0)
    }

    /// Markdown line inserted at the top of the PR body.
    pub fn markdown_link(&self, base_url: &str) -> String {
        format!("Jira Issue: [{}]({})", self.0, self.browse_url(base_url))
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
