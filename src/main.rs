mod actions;
mod annotate;
mod config;
mod jira;
mod logging;
mod pr;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::util::SubscriberInitExt;

use crate::annotate::{AnnotateError, Annotator, Outcome};
use crate::config::{Overrides, Settings};
use crate::pr::{GitHubClient, TriggerContext};

/// PR Jira Linker: prefixes a pull request's title with the Jira issue key
/// found in its branch name and adds a link to the issue in its description.
#[derive(Parser, Debug)]
#[command(name = "pr-jira-linker", version, about)]
struct Cli {
    /// Regex fragment for the project part of an issue key
    #[arg(long, env = "INPUT_JIRA-PROJECT-KEY-REGEX")]
    project_key_regex: Option<String>,

    /// Jira instance URL (e.g., https://your-domain.atlassian.net)
    #[arg(long, env = "INPUT_JIRA-BASE-URL")]
    jira_base_url: Option<String>,

    /// Path to the webhook event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "pull_request")]
    event_name: String,

    /// Repository as owner/repo; read from the payload when omitted
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Optional TOML config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::subscriber(logging::default_filter(), std::io::stdout).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = err.to_string();
            error!("{}", message);
            actions::set_failed(&message);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(
        Overrides {
            project_key_regex: cli.project_key_regex,
            jira_base_url: cli.jira_base_url,
            api_url: cli.api_url,
        },
        &cli.config,
        std::env::var("GITHUB_TOKEN").ok(),
    )?;
    debug!(pattern = %settings.project_key_regex, jira = %settings.jira_base_url, api = %settings.api_url, "resolved settings");

    // Without a payload there is no pull request to act on.
    let event_path = cli.event_path.ok_or(AnnotateError::NotPullRequest)?;
    let repository = cli.repository.filter(|r| !r.is_empty());
    let context = TriggerContext::load(&event_path, &cli.event_name, repository.as_deref())?;

    let client = GitHubClient::new(settings.token.clone(), settings.api_url.clone());
    let outcome = Annotator::new(&settings, &client).run(&context).await?;
    match &outcome {
        Outcome::NoIssue => debug!("no issue key in branch"),
        Outcome::Annotated { key, title, body } => {
            debug!(%key, ?title, ?body, updates = outcome.updates(), "annotation complete")
        }
    }

    Ok(())
}
