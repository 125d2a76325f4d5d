//! Dry-run wrapper for any GitHubClient.
//!
//! Reads pass through to the wrapped client; every mutation is logged
//! and counted instead of being sent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Issue, Label};
use crate::domain::ports::GitHubClient;

/// Dry-run GitHub client decorator.
pub struct DryRunGitHubClient {
    inner: Arc<dyn GitHubClient>,
    skipped: AtomicUsize,
}

impl DryRunGitHubClient {
    /// Wrap `inner`
    pub fn new(inner: Arc<dyn GitHubClient>) -> Self {
        Self {
            inner,
            skipped: AtomicUsize::new(0),
        }
    }

    /// Number of mutations that were logged instead of executed.
    pub fn skipped_mutations(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }

    fn skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl GitHubClient for DryRunGitHubClient {
    async fn list_repositories(&self) -> DomainResult<Vec<String>> {
        self.inner.list_repositories().await
    }

    async fn list_labels(&self, repo: &str) -> DomainResult<Vec<Label>> {
        self.inner.list_labels(repo).await
    }

    async fn create_label(&self, repo: &str, label: &Label) -> DomainResult<()> {
        info!(repo, label = %label, "[dry-run] would create label");
        self.skip();
        Ok(())
    }

    async fn delete_label(&self, repo: &str, name: &str) -> DomainResult<()> {
        info!(repo, label = name, "[dry-run] would delete label");
        self.skip();
        Ok(())
    }

    async fn rename_label(&self, repo: &str, old_name: &str, new_name: &str) -> DomainResult<()> {
        info!(repo, from = old_name, to = new_name, "[dry-run] would rename label");
        self.skip();
        Ok(())
    }

    async fn list_open_issues(&self, repo: &str) -> DomainResult<Vec<Issue>> {
        self.inner.list_open_issues(repo).await
    }

    async fn add_label(&self, issue_url: &str, name: &str) -> DomainResult<()> {
        info!(issue = issue_url, label = name, "[dry-run] would add label");
        self.skip();
        Ok(())
    }

    async fn remove_label(&self, issue_url: &str, name: &str) -> DomainResult<()> {
        info!(issue = issue_url, label = name, "[dry-run] would remove label");
        self.skip();
        Ok(())
    }
}
