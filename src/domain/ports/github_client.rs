//! GitHub port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Issue, Label};

/// Repository source, label source/sink, issue source and issue-label
/// sink for one organization.
///
/// Implementations are bound to a single organization; repository
/// arguments are bare repository names. Mutations must treat "already
/// there" / "already gone" responses as success.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Names of the organization's non-archived repositories, sorted and
    /// deduplicated.
    async fn list_repositories(&self) -> DomainResult<Vec<String>>;

    /// All labels defined in a repository.
    async fn list_labels(&self, repo: &str) -> DomainResult<Vec<Label>>;

    /// Create a repository label.
    async fn create_label(&self, repo: &str, label: &Label) -> DomainResult<()>;

    /// Delete a repository label by name.
    async fn delete_label(&self, repo: &str, name: &str) -> DomainResult<()>;

    /// Rename a repository label. A missing `old_name` is a no-op.
    async fn rename_label(&self, repo: &str, old_name: &str, new_name: &str) -> DomainResult<()>;

    /// Open issues with labels and comments, comments oldest first.
    async fn list_open_issues(&self, repo: &str) -> DomainResult<Vec<Issue>>;

    /// Add a label to the issue at `issue_url`.
    async fn add_label(&self, issue_url: &str, name: &str) -> DomainResult<()>;

    /// Remove a label from the issue at `issue_url`.
    async fn remove_label(&self, issue_url: &str, name: &str) -> DomainResult<()>;
}
