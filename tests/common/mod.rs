//! Common test utilities for integration tests
//!
//! Provides an in-memory GitHub organization that implements the
//! `GitHubClient` port, applies label mutations to its own state and
//! records every call in order.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use issue_overseer::domain::models::{AuthorAssociation, Comment, Issue, Label};
use issue_overseer::domain::ports::GitHubClient;
use issue_overseer::domain::DomainResult;

/// One call made through the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListRepositories,
    ListLabels(String),
    CreateLabel(String, Label),
    DeleteLabel(String, String),
    RenameLabel(String, String, String),
    ListOpenIssues(String),
    AddLabel(String, String),
    RemoveLabel(String, String),
}

impl Call {
    /// Whether the call changes state on GitHub.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Self::ListRepositories | Self::ListLabels(_) | Self::ListOpenIssues(_)
        )
    }
}

#[derive(Debug, Default)]
struct RepoState {
    labels: Vec<Label>,
    issues: Vec<Issue>,
}

#[derive(Debug, Default)]
struct State {
    repos: BTreeMap<String, RepoState>,
    calls: Vec<Call>,
}

/// In-memory organization.
#[derive(Debug, Default)]
pub struct RecordingGitHubClient {
    state: Mutex<State>,
}

impl RecordingGitHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a repository with its labels and open issues.
    #[must_use]
    pub fn with_repo(self, name: &str, labels: Vec<Label>, issues: Vec<Issue>) -> Self {
        self.state
            .lock()
            .unwrap()
            .repos
            .insert(name.to_string(), RepoState { labels, issues });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn repo_labels(&self, repo: &str) -> Vec<Label> {
        self.state.lock().unwrap().repos[repo].labels.clone()
    }

    /// Names of the labels currently on the issue with this URL.
    pub fn issue_label_names(&self, issue_url: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .repos
            .values()
            .flat_map(|repo| repo.issues.iter())
            .find(|issue| issue.url == issue_url)
            .map(|issue| issue.labels.iter().map(|label| label.name.clone()).collect())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) -> std::sync::MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl GitHubClient for RecordingGitHubClient {
    async fn list_repositories(&self) -> DomainResult<Vec<String>> {
        let state = self.record(Call::ListRepositories);
        Ok(state.repos.keys().cloned().collect())
    }

    async fn list_labels(&self, repo: &str) -> DomainResult<Vec<Label>> {
        let state = self.record(Call::ListLabels(repo.to_string()));
        Ok(state.repos.get(repo).map(|r| r.labels.clone()).unwrap_or_default())
    }

    async fn create_label(&self, repo: &str, label: &Label) -> DomainResult<()> {
        let mut state = self.record(Call::CreateLabel(repo.to_string(), label.clone()));
        let labels = &mut state.repos.entry(repo.to_string()).or_default().labels;
        if !labels.iter().any(|existing| existing.same_name_ignoring_case(label)) {
            labels.push(label.clone());
        }
        Ok(())
    }

    async fn delete_label(&self, repo: &str, name: &str) -> DomainResult<()> {
        let mut state = self.record(Call::DeleteLabel(repo.to_string(), name.to_string()));
        if let Some(repo) = state.repos.get_mut(repo) {
            repo.labels.retain(|label| !label.name.eq_ignore_ascii_case(name));
            for issue in &mut repo.issues {
                issue.labels.retain(|label| !label.name.eq_ignore_ascii_case(name));
            }
        }
        Ok(())
    }

    async fn rename_label(&self, repo: &str, old_name: &str, new_name: &str) -> DomainResult<()> {
        let mut state = self.record(Call::RenameLabel(
            repo.to_string(),
            old_name.to_string(),
            new_name.to_string(),
        ));
        if let Some(repo) = state.repos.get_mut(repo) {
            let issue_labels = repo.issues.iter_mut().flat_map(|issue| issue.labels.iter_mut());
            for label in repo.labels.iter_mut().chain(issue_labels) {
                if label.name == old_name {
                    label.name = new_name.to_string();
                }
            }
        }
        Ok(())
    }

    async fn list_open_issues(&self, repo: &str) -> DomainResult<Vec<Issue>> {
        let state = self.record(Call::ListOpenIssues(repo.to_string()));
        Ok(state.repos.get(repo).map(|r| r.issues.clone()).unwrap_or_default())
    }

    async fn add_label(&self, issue_url: &str, name: &str) -> DomainResult<()> {
        let mut state = self.record(Call::AddLabel(issue_url.to_string(), name.to_string()));
        for repo in state.repos.values_mut() {
            let color = repo
                .labels
                .iter()
                .find(|label| label.name == name)
                .map(|label| label.color.clone())
                .unwrap_or_default();
            if let Some(issue) = repo.issues.iter_mut().find(|issue| issue.url == issue_url) {
                if !issue.has_label(name) {
                    issue.labels.push(Label::new(name, color));
                }
            }
        }
        Ok(())
    }

    async fn remove_label(&self, issue_url: &str, name: &str) -> DomainResult<()> {
        let mut state = self.record(Call::RemoveLabel(issue_url.to_string(), name.to_string()));
        for repo in state.repos.values_mut() {
            if let Some(issue) = repo.issues.iter_mut().find(|issue| issue.url == issue_url) {
                issue.labels.retain(|label| label.name != name);
            }
        }
        Ok(())
    }
}

/// Open issue in `repo` of the `acme` organization.
pub fn issue(
    repo: &str,
    number: u64,
    author_association: AuthorAssociation,
    labels: &[&str],
    comments: Vec<Comment>,
) -> Issue {
    Issue {
        title: format!("Issue {number}"),
        url: format!("https://github.com/acme/{repo}/issues/{number}"),
        number,
        author_association,
        labels: labels.iter().map(|name| Label::named(*name)).collect(),
        comments,
    }
}

pub fn comment(author_association: AuthorAssociation, login: &str) -> Comment {
    Comment::new(author_association, login)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
