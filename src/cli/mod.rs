//! Command-line interface.

pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::adapters::{DryRunGitHubClient, GitHubClientConfig, GitHubClientImpl};
use crate::domain::models::Config;
use crate::domain::ports::GitHubClient;
use crate::services::{
    AnsweringClassifier, ManualLabelRule, MigrationRunner, Overseer, RunReport, MIGRATIONS,
};

pub use output::{output, CommandOutput};

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "issue-overseer")]
#[command(about = "Keep answering labels on open GitHub issues in sync", long_about = None)]
#[command(version)]
pub struct Cli {
    /// GitHub organization to oversee
    pub organization: String,

    /// Additional configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log mutations instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Apply pending label migrations before triage
    #[arg(long)]
    pub migrate: bool,

    /// Output in JSON format
    #[arg(short, long)]
    pub json: bool,
}

/// Options for one run, independent of how the client was built.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Log mutations instead of sending them
    pub dry_run: bool,
    /// Apply label migrations before triage
    pub migrate: bool,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            dry_run: cli.dry_run,
            migrate: cli.migrate,
        }
    }
}

/// Result of a run, as printed to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    /// Id attached to every log event of the run
    pub run_id: Uuid,
    /// Organization processed
    pub organization: String,
    /// Start time
    pub started_at: DateTime<Utc>,
    /// End time
    pub finished_at: DateTime<Utc>,
    /// Whether mutations were only logged
    pub dry_run: bool,
    /// Mutations logged instead of sent
    pub skipped_mutations: usize,
    /// Ids of the migrations run
    pub migrations_applied: Vec<&'static str>,
    /// Per-repository triage report
    pub report: RunReport,
}

/// Read the token from the environment.
pub fn token_from_env() -> Result<String> {
    let token = std::env::var(TOKEN_ENV)
        .with_context(|| format!("{TOKEN_ENV} must be set to a GitHub token"))?;
    if token.trim().is_empty() {
        anyhow::bail!("{TOKEN_ENV} is empty");
    }
    Ok(token)
}

/// Build the HTTP client from configuration and run.
pub async fn execute(cli: &Cli, config: &Config, token: String) -> Result<RunOutput> {
    let client_config = GitHubClientConfig::from_config(cli.organization.clone(), token, config);
    let client = GitHubClientImpl::with_config(client_config)
        .context("Failed to build GitHub client")?;
    run(&cli.organization, config, Arc::new(client), &RunOptions::from(cli)).await
}

/// Run migrations (if asked) and triage every repository of `organization`.
pub async fn run(
    organization: &str,
    config: &Config,
    client: Arc<dyn GitHubClient>,
    options: &RunOptions,
) -> Result<RunOutput> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let span = info_span!("run", %run_id, organization);

    async move {
        let dry_run = options
            .dry_run
            .then(|| Arc::new(DryRunGitHubClient::new(Arc::clone(&client))));
        let client: Arc<dyn GitHubClient> = match &dry_run {
            Some(wrapper) => Arc::clone(wrapper) as Arc<dyn GitHubClient>,
            None => client,
        };

        let repos = client
            .list_repositories()
            .await
            .context("Failed to list repositories")?;
        info!(count = repos.len(), dry_run = options.dry_run, "Repositories listed");

        let migrations_applied = if options.migrate {
            MigrationRunner::new(Arc::clone(&client))
                .up(MIGRATIONS, &repos)
                .await
                .context("Migration failed")?
        } else {
            Vec::new()
        };

        let manual_rules = config
            .labels
            .manual_labels
            .iter()
            .cloned()
            .map(|manual| ManualLabelRule::new(manual, &config.labels.missing_color))
            .collect();
        let overseer = Overseer::new(
            client,
            AnsweringClassifier::with_bot_logins(config.labels.bot_logins.clone()),
            config.labels.answering_labels(organization),
        )
        .with_manual_rules(manual_rules);

        let report = overseer
            .update_repos(&repos)
            .await
            .context("Triage failed")?;

        Ok::<_, anyhow::Error>(RunOutput {
            run_id,
            organization: organization.to_string(),
            started_at,
            finished_at: Utc::now(),
            dry_run: options.dry_run,
            skipped_mutations: dry_run.map_or(0, |wrapper| wrapper.skipped_mutations()),
            migrations_applied,
            report,
        })
    }
    .instrument(span)
    .await
}

/// Print the error chain and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let causes: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({ "error": err.to_string(), "causes": causes });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
    }
    std::process::exit(1);
}
