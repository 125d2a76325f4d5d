//! Infrastructure adapters for external systems.

pub mod dry_run;
pub mod github;

pub use dry_run::DryRunGitHubClient;
pub use github::{GitHubClientConfig, GitHubClientImpl};
