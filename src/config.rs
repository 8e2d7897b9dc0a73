use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::annotate::types::messages;
use crate::pr::DEFAULT_API_URL;

pub const DEFAULT_CONFIG_FILE: &str = ".pr-jira-linker.toml";
pub const DEFAULT_PROJECT_KEY_REGEX: &str = "[A-Za-z0-9_-]+";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{}", messages::MISSING_TOKEN)]
    MissingToken,
}

/// Optional configuration loaded from .pr-jira-linker.toml.
///
/// All fields are optional; action inputs and environment override them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub jira: JiraConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraConfig {
    /// Regex fragment for the project part of an issue key
    pub project_key_regex: Option<String>,
    /// Jira instance URL, e.g. https://your-domain.atlassian.net
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,
    /// REST API root, for GitHub Enterprise Server
    pub api_url: Option<String>,
}

impl FileConfig {
    /// Load configuration from `path`, returning defaults if it doesn't exist.
    pub fn load(path: &Path) -> Result<FileConfig, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(FileConfig::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Values supplied as action inputs or CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project_key_regex: Option<String>,
    pub jira_base_url: Option<String>,
    pub api_url: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_key_regex: String,
    pub jira_base_url: String,
    pub token: String,
    pub api_url: String,
}

impl Settings {
    /// Read the config file at `path` and resolve it against the inputs.
    ///
    /// A missing token is reported even when the file cannot be read or parsed.
    pub fn load(
        overrides: Overrides,
        path: &Path,
        env_token: Option<String>,
    ) -> Result<Settings, ConfigError> {
        let env_token = non_empty(env_token);
        let file = match FileConfig::load(path) {
            Ok(file) => file,
            Err(_) if env_token.is_none() => return Err(ConfigError::MissingToken),
            Err(err) => return Err(err),
        };
        Self::resolve(overrides, file, env_token)
    }

    /// Merge inputs over the config file over defaults.
    ///
    /// The token comes from the config file, else `env_token`. Its absence is
    /// checked first so nothing else runs without credentials. Empty strings
    /// count as unset, since the runner exports empty inputs. An unset Jira
    /// base URL is left empty.
    pub fn resolve(
        overrides: Overrides,
        file: FileConfig,
        env_token: Option<String>,
    ) -> Result<Settings, ConfigError> {
        let token = non_empty(file.github.token)
            .or_else(|| non_empty(env_token))
            .ok_or(ConfigError::MissingToken)?;

        let project_key_regex = non_empty(overrides.project_key_regex)
            .or_else(|| non_empty(file.jira.project_key_regex))
            .unwrap_or_else(|| DEFAULT_PROJECT_KEY_REGEX.to_string());

        let jira_base_url = non_empty(overrides.jira_base_url)
            .or_else(|| non_empty(file.jira.base_url))
            .unwrap_or_default();

        let api_url = non_empty(overrides.api_url)
            .or_else(|| non_empty(file.github.api_url))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Settings {
            project_key_regex,
            jira_base_url,
            token,
            api_url,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
