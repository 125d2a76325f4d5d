//! Configuration model.

use serde::{Deserialize, Serialize};

use super::issue::DEFAULT_BOT_LOGIN;
use super::label::Label;
use super::triage::{AnsweringLabels, ManualLabelConfig};

/// Main configuration structure for the issue overseer
///
/// There is no token field; the token is read from
/// `GITHUB_TOKEN` by the CLI and never stored in config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub endpoint configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// Managed label configuration
    #[serde(default)]
    pub labels: LabelsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

/// GitHub endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// GraphQL endpoint URL
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Open issues fetched per GraphQL page (1-100)
    #[serde(default = "default_issues_page_size")]
    pub issues_page_size: u32,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_graphql_url() -> String {
    "https://api.github.com/graphql".to_string()
}

fn default_user_agent() -> String {
    "issue-overseer".to_string()
}

const fn default_issues_page_size() -> u32 {
    20
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            graphql_url: default_graphql_url(),
            user_agent: default_user_agent(),
            issues_page_size: default_issues_page_size(),
        }
    }
}

/// Name and colour of one managed label.
///
/// `{organization}` inside the name is replaced with the organization
/// being processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
    /// Label name, possibly containing `{organization}`
    pub name: String,
    /// Hex colour without the leading `#`
    pub color: String,
}

impl LabelSpec {
    fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Resolve the name template for `organization`.
    pub fn resolve(&self, organization: &str) -> Label {
        Label::new(self.name.replace("{organization}", organization), &self.color)
    }
}

/// Managed label configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LabelsConfig {
    /// Label for issues reported by the organization itself
    #[serde(default = "default_ours_label")]
    pub ours: LabelSpec,

    /// Label for issues where a member had the last word
    #[serde(default = "default_answered_label")]
    pub answered: LabelSpec,

    /// Label for issues still waiting for a member
    #[serde(default = "default_not_answered_label")]
    pub not_answered: LabelSpec,

    /// Manual label families to flag with a `missing: <prefix>` marker
    #[serde(default)]
    pub manual_labels: Vec<ManualLabelConfig>,

    /// Colour of the `missing: <prefix>` marker labels
    #[serde(default = "default_missing_color")]
    pub missing_color: String,

    /// Bot accounts whose comments are ignored by triage
    #[serde(default = "default_bot_logins")]
    pub bot_logins: Vec<String>,
}

fn default_ours_label() -> LabelSpec {
    LabelSpec::new("answering: reported by {organization}", "a0a000")
}

fn default_answered_label() -> LabelSpec {
    LabelSpec::new("answering: answered", "00a000")
}

fn default_not_answered_label() -> LabelSpec {
    LabelSpec::new("answering: not answered", "a00000")
}

fn default_missing_color() -> String {
    "d4c5f9".to_string()
}

fn default_bot_logins() -> Vec<String> {
    vec![DEFAULT_BOT_LOGIN.to_string()]
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            ours: default_ours_label(),
            answered: default_answered_label(),
            not_answered: default_not_answered_label(),
            manual_labels: vec![],
            missing_color: default_missing_color(),
            bot_logins: default_bot_logins(),
        }
    }
}

impl LabelsConfig {
    /// Resolve the answering label family for `organization`.
    pub fn answering_labels(&self, organization: &str) -> AnsweringLabels {
        AnsweringLabels {
            ours: self.ours.resolve(organization),
            answered: self.answered.resolve(organization),
            not_answered: self.not_answered.resolve(organization),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for a daily rolling JSON log file (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Requests per second allowed
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Burst size for the limiter
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,
}

const fn default_requests_per_second() -> u32 {
    10
}

const fn default_burst_size() -> u32 {
    20
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst_size: default_burst_size(),
        }
    }
}

/// Retry policy for transient GitHub failures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Total time budget for retrying one request; 0 disables retries
    #[serde(default = "default_max_elapsed_ms")]
    pub max_elapsed_ms: u64,

    /// Initial backoff in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_elapsed_ms() -> u64 {
    60_000
}

const fn default_initial_backoff_ms() -> u64 {
    500
}

const fn default_max_backoff_ms() -> u64 {
    10_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_elapsed_ms: default_max_elapsed_ms(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_answering_labels() {
        let labels = LabelsConfig::default().answering_labels("brainhubeu");
        assert_eq!(labels.ours, Label::new("answering: reported by brainhubeu", "a0a000"));
        assert_eq!(labels.answered, Label::new("answering: answered", "00a000"));
        assert_eq!(labels.not_answered, Label::new("answering: not answered", "a00000"));
    }

    #[test]
    fn test_default_bot_login() {
        assert_eq!(LabelsConfig::default().bot_logins, vec!["issuehunt-app".to_string()]);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r"
labels:
  answered:
    name: 'status: answered'
    color: '00ff00'
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.labels.answered.name, "status: answered");
        assert_eq!(config.labels.not_answered.name, "answering: not answered");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.rate_limit.requests_per_second, 10);
    }
}
