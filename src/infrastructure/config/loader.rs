//! Layered configuration loading and validation.

use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config, lowest file precedence
pub const PROJECT_CONFIG_PATH: &str = ".issue-overseer/config.yaml";

/// Project-local overrides, typically not committed
pub const LOCAL_CONFIG_PATH: &str = ".issue-overseer/local.yaml";

/// Prefix of environment variable overrides (`__` separates nesting)
pub const ENV_PREFIX: &str = "ISSUE_OVERSEER_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    /// Unknown `logging.level`
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    /// Unknown `logging.format`
    InvalidLogFormat(String),

    #[error("Invalid rate limit: {0}. Must be positive")]
    /// Zero `rate_limit.requests_per_second`
    InvalidRateLimit(u32),

    #[error("Invalid burst_size: {0}. Must be at least 1")]
    /// Zero `rate_limit.burst_size`
    InvalidBurstSize(u32),

    #[error("Invalid issues_page_size: {0}. Must be between 1 and 100")]
    /// `github.issues_page_size` outside 1-100
    InvalidPageSize(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must not exceed max_backoff_ms ({1})"
    )]
    /// Initial backoff above the maximum
    InvalidBackoff(u64, u64),

    #[error("Invalid label color for '{name}': {color}. Must be six hex digits")]
    /// Label colour that is not six hex digits
    InvalidLabelColor { name: String, color: String },

    #[error("Duplicate managed label name: {0}")]
    /// Two managed labels with the same name
    DuplicateLabel(String),

    #[error("Configuration validation failed: {0}")]
    /// Any other invalid value
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .issue-overseer/config.yaml
    /// 3. .issue-overseer/local.yaml
    /// 4. The explicit `--config` file, when given
    /// 5. Environment variables (ISSUE_OVERSEER_* prefix)
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(PROJECT_CONFIG_PATH))
            .merge(Yaml::file(LOCAL_CONFIG_PATH));

        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.rate_limit.requests_per_second == 0 {
            return Err(ConfigError::InvalidRateLimit(
                config.rate_limit.requests_per_second,
            ));
        }

        if config.rate_limit.burst_size == 0 {
            return Err(ConfigError::InvalidBurstSize(config.rate_limit.burst_size));
        }

        if !(1..=100).contains(&config.github.issues_page_size) {
            return Err(ConfigError::InvalidPageSize(config.github.issues_page_size));
        }

        if config.retry.initial_backoff_ms > config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        let labels = &config.labels;
        let managed = [&labels.ours, &labels.answered, &labels.not_answered];
        for spec in managed {
            if spec.name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "Answering label names cannot be empty".to_string(),
                ));
            }
            validate_color(&spec.name, &spec.color)?;
        }
        validate_color("missing: *", &labels.missing_color)?;

        let mut names: Vec<String> = managed.iter().map(|spec| spec.name.to_lowercase()).collect();
        for manual in &labels.manual_labels {
            if manual.prefix.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "Manual label prefix cannot be empty".to_string(),
                ));
            }
            names.push(manual.marker_name().to_lowercase());
        }
        let mut seen = std::collections::HashSet::new();
        for name in names {
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateLabel(name));
            }
        }

        Ok(())
    }
}

fn validate_color(name: &str, color: &str) -> Result<(), ConfigError> {
    if color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLabelColor {
            name: name.to_string(),
            color: color.to_string(),
        })
    }
}
