//! Issue Overseer - answering-state triage for GitHub organizations
//!
//! Issue Overseer walks every non-archived repository of an organization,
//! makes sure the answering labels exist with the right colours, and tags
//! every open issue with exactly one of them depending on who spoke last.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, the `GitHubClient` port and errors
//! - **Service Layer** (`services`): Classifiers, label reconciliation, the overseer
//! - **Adapters** (`adapters`): GitHub REST/GraphQL client and the dry-run decorator
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use issue_overseer::{AnsweringClassifier, Config, GitHubClientConfig, GitHubClientImpl, Overseer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let client = GitHubClientImpl::with_config(GitHubClientConfig::from_config(
//!         "acme".into(),
//!         std::env::var("GITHUB_TOKEN")?,
//!         &config,
//!     ))?;
//!     let overseer = Overseer::new(
//!         Arc::new(client),
//!         AnsweringClassifier::new(),
//!         config.labels.answering_labels("acme"),
//!     );
//!     overseer.update_repos(&["widgets".to_string()]).await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{DryRunGitHubClient, GitHubClientConfig, GitHubClientImpl};
pub use domain::models::{
    AnsweringLabels, AnsweringType, AuthorAssociation, Comment, Config, Issue, Label,
    LoggingConfig, ManualLabelConfig, ManualLabelType, RateLimitConfig, RetryConfig,
};
pub use domain::ports::GitHubClient;
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    AnsweringClassifier, ManualLabelClassifier, MigrationRunner, Overseer, RunReport,
};
