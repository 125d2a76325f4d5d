//! GitHub HTTP client with rate limiting and retries.
//!
//! Implements [`GitHubClient`] on top of the GitHub REST API v3 (labels,
//! repositories, issue labels) and the GraphQL API v4 (open issues with
//! their labels and comments). Requests go through a GCRA rate limiter
//! and transient failures are retried with exponential backoff.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Config, Issue, Label, RetryConfig};
use crate::domain::ports::GitHubClient;

use super::models::{
    AddLabelsRequest, CreateLabelRequest, GitHubLabel, GitHubRepository, GraphQlRequest,
    GraphQlResponse, OpenIssuesData, OpenIssuesVariables, RenameLabelRequest, OPEN_ISSUES_QUERY,
};

/// Items requested per page from REST list endpoints.
const REST_PAGE_SIZE: &str = "100";

/// Connection settings for [`GitHubClientImpl`].
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// Organization whose repositories are processed
    pub organization: String,
    /// Personal access token or fine-grained token
    pub token: String,
    /// REST API base URL
    pub api_url: String,
    /// GraphQL endpoint
    pub graphql_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Open issues per GraphQL page
    pub issues_page_size: u32,
    /// Sustained request rate
    pub requests_per_second: u32,
    /// Requests allowed back to back
    pub burst_size: u32,
    /// Retry policy for transient failures
    pub retry: RetryConfig,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        let config = Config::default();
        Self::from_config(String::new(), String::new(), &config)
    }
}

impl GitHubClientConfig {
    /// Build client settings from the loaded application config.
    pub fn from_config(organization: String, token: String, config: &Config) -> Self {
        Self {
            organization,
            token,
            api_url: config.github.api_url.clone(),
            graphql_url: config.github.graphql_url.clone(),
            user_agent: config.github.user_agent.clone(),
            issues_page_size: config.github.issues_page_size,
            requests_per_second: config.rate_limit.requests_per_second,
            burst_size: config.rate_limit.burst_size,
            retry: config.retry.clone(),
            timeout_secs: 30,
        }
    }
}

/// HTTP client for one GitHub organization.
///
/// All methods return [`DomainResult`]; non-tolerated HTTP statuses map to
/// [`DomainError::GitHubStatus`] and network errors to
/// [`DomainError::GitHubRequest`].
pub struct GitHubClientImpl {
    http: Client,
    organization: String,
    token: String,
    api_url: Url,
    graphql_url: Url,
    user_agent: String,
    issues_page_size: u32,
    rate_limiter: DefaultDirectRateLimiter,
    retry: RetryConfig,
    /// Requests sent so far, for diagnostics
    requests: AtomicU64,
}

impl std::fmt::Debug for GitHubClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClientImpl")
            .field("organization", &self.organization)
            .field("api_url", &self.api_url.as_str())
            .field("graphql_url", &self.graphql_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GitHubClientImpl {
    /// Create a client from explicit settings.
    pub fn with_config(config: GitHubClientConfig) -> DomainResult<Self> {
        if config.token.is_empty() {
            return Err(DomainError::Configuration(
                "GitHub token must not be empty".to_string(),
            ));
        }

        let api_url = parse_url("api_url", &config.api_url)?;
        let graphql_url = parse_url("graphql_url", &config.graphql_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let quota = Quota::per_second(non_zero(config.requests_per_second))
            .allow_burst(non_zero(config.burst_size));

        Ok(Self {
            http,
            organization: config.organization,
            token: config.token,
            api_url,
            graphql_url,
            user_agent: config.user_agent,
            issues_page_size: config.issues_page_size.clamp(1, 100),
            rate_limiter: RateLimiter::direct(quota),
            retry: config.retry,
            requests: AtomicU64::new(0),
        })
    }

    /// Organization this client is bound to.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Number of HTTP requests sent so far (retries included).
    pub fn requests_sent(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// `<api_url>/<segments...>`, each segment percent-encoded.
    fn rest_url(&self, segments: &[&str]) -> DomainResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DomainError::Configuration(format!("GitHub API URL cannot be a base: {}", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn repo_url(&self, repo: &str, rest: &[&str]) -> DomainResult<Url> {
        let mut segments = vec!["repos", self.organization.as_str(), repo];
        segments.extend_from_slice(rest);
        self.rest_url(&segments)
    }

    /// Map an issue's HTML URL to its REST labels endpoint.
    ///
    /// `https://github.com/{owner}/{repo}/issues/{n}` becomes
    /// `<api_url>/repos/{owner}/{repo}/issues/{n}/labels[/{name}]`.
    pub fn issue_labels_url(&self, issue_url: &str, name: Option<&str>) -> DomainResult<Url> {
        let parsed =
            Url::parse(issue_url).map_err(|e| DomainError::InvalidIssueUrl(format!("{issue_url}: {e}")))?;
        let path: Vec<&str> = parsed
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let [owner, repo, "issues", number] = path.as_slice() else {
            return Err(DomainError::InvalidIssueUrl(issue_url.to_string()));
        };

        let mut segments = vec!["repos", *owner, *repo, "issues", *number, "labels"];
        segments.extend(name);
        self.rest_url(&segments)
    }

    fn backoff_policy(&self) -> backoff::ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(self.retry.initial_backoff_ms))
            .with_max_interval(Duration::from_millis(self.retry.max_backoff_ms))
            .with_max_elapsed_time(Some(Duration::from_millis(self.retry.max_elapsed_ms)))
            .build()
    }

    /// Send a request, retrying transient failures.
    ///
    /// Statuses in `tolerated` are returned like successes so that callers
    /// can treat "already exists" / "already gone" as no-ops.
    async fn send<F>(&self, operation: &str, tolerated: &[StatusCode], build: F) -> DomainResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let build = &build;
        backoff::future::retry(self.backoff_policy(), move || async move {
            self.rate_limiter.until_ready().await;
            let request = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(request, operation, "Sending GitHub request");

            let response = build()
                .bearer_auth(&self.token)
                .header(reqwest::header::ACCEPT, "application/vnd.github+json")
                .header("X-GitHub-Api-Version", "2022-11-28")
                .header(reqwest::header::USER_AGENT, &self.user_agent)
                .send()
                .await
                .map_err(|e| {
                    backoff::Error::transient(DomainError::GitHubRequest {
                        operation: operation.to_string(),
                        message: e.to_string(),
                    })
                })?;

            let status = response.status();
            if status.is_success() || tolerated.contains(&status) {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            let err = DomainError::GitHubStatus {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            };
            if err.is_transient() {
                debug!(request, operation, status = status.as_u16(), "Transient GitHub failure");
                Err(backoff::Error::transient(err))
            } else {
                Err(backoff::Error::permanent(err))
            }
        })
        .await
    }

    async fn parse<T: DeserializeOwned>(operation: &str, response: Response) -> DomainResult<T> {
        let body = response.bytes().await.map_err(|e| DomainError::GitHubRequest {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_slice(&body).map_err(|e| {
            DomainError::Serialization(format!("GitHub {operation} parse failed: {e}"))
        })
    }

    /// Fetch every page of a REST list endpoint until an empty page.
    async fn list_all<T: DeserializeOwned>(&self, operation: &str, base: Url) -> DomainResult<Vec<T>> {
        let mut items = Vec::new();
        for page in 1.. {
            let mut url = base.clone();
            url.query_pairs_mut()
                .append_pair("per_page", REST_PAGE_SIZE)
                .append_pair("page", &page.to_string());

            let response = self
                .send(operation, &[], || self.http.request(Method::GET, url.clone()))
                .await?;
            let batch: Vec<T> = Self::parse(operation, response).await?;
            if batch.is_empty() {
                break;
            }
            items.extend(batch);
        }
        Ok(items)
    }
}

#[async_trait]
impl GitHubClient for GitHubClientImpl {
    async fn list_repositories(&self) -> DomainResult<Vec<String>> {
        let url = self.rest_url(&["orgs", &self.organization, "repos"])?;
        let repositories: Vec<GitHubRepository> = self.list_all("list_repositories", url).await?;

        let mut names: Vec<String> = repositories
            .into_iter()
            .filter(|repo| !repo.archived)
            .map(|repo| repo.name)
            .collect();
        names.sort();
        names.dedup();
        info!(organization = %self.organization, repositories = names.len(), "Listed repositories");
        Ok(names)
    }

    async fn list_labels(&self, repo: &str) -> DomainResult<Vec<Label>> {
        let url = self.repo_url(repo, &["labels"])?;
        let labels: Vec<GitHubLabel> = self.list_all("list_labels", url).await?;
        Ok(labels.into_iter().map(Label::from).collect())
    }

    async fn create_label(&self, repo: &str, label: &Label) -> DomainResult<()> {
        let url = self.repo_url(repo, &["labels"])?;
        let body = CreateLabelRequest {
            name: &label.name,
            color: &label.color,
        };
        let response = self
            .send("create_label", &[StatusCode::UNPROCESSABLE_ENTITY], || {
                self.http.request(Method::POST, url.clone()).json(&body)
            })
            .await?;
        info!(repo, label = %label.name, status = response.status().as_u16(), "Created label");
        Ok(())
    }

    async fn delete_label(&self, repo: &str, name: &str) -> DomainResult<()> {
        let url = self.repo_url(repo, &["labels", name])?;
        let response = self
            .send("delete_label", &[StatusCode::NOT_FOUND], || {
                self.http.request(Method::DELETE, url.clone())
            })
            .await?;
        info!(repo, label = name, status = response.status().as_u16(), "Deleted label");
        Ok(())
    }

    async fn rename_label(&self, repo: &str, old_name: &str, new_name: &str) -> DomainResult<()> {
        let url = self.repo_url(repo, &["labels", old_name])?;
        let body = RenameLabelRequest { new_name };
        let response = self
            .send("rename_label", &[StatusCode::NOT_FOUND], || {
                self.http.request(Method::PATCH, url.clone()).json(&body)
            })
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(repo, label = old_name, "Label to rename does not exist");
        } else {
            info!(repo, from = old_name, to = new_name, "Renamed label");
        }
        Ok(())
    }

    async fn list_open_issues(&self, repo: &str) -> DomainResult<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let body = GraphQlRequest {
                query: OPEN_ISSUES_QUERY,
                variables: OpenIssuesVariables {
                    organization: &self.organization,
                    repo_name: repo,
                    cursor: cursor.as_deref(),
                    page_size: self.issues_page_size,
                },
            };
            let response = self
                .send("list_open_issues", &[], || {
                    self.http.request(Method::POST, self.graphql_url.clone()).json(&body)
                })
                .await?;
            let page: GraphQlResponse<OpenIssuesData> = Self::parse("list_open_issues", response).await?;

            if !page.errors.is_empty() {
                let messages: Vec<String> = page.errors.into_iter().map(|e| e.message).collect();
                return Err(DomainError::GraphQl(messages.join("; ")));
            }
            let connection = page
                .data
                .and_then(|data| data.repository)
                .ok_or_else(|| DomainError::GraphQl(format!("Repository {repo} not found")))?
                .issues;

            issues.extend(connection.edges.into_iter().map(|edge| Issue::from(edge.node)));
            match connection.page_info.end_cursor {
                Some(end_cursor) if connection.page_info.has_next_page => cursor = Some(end_cursor),
                _ => break,
            }
        }
        Ok(issues)
    }

    async fn add_label(&self, issue_url: &str, name: &str) -> DomainResult<()> {
        let url = self.issue_labels_url(issue_url, None)?;
        let body = AddLabelsRequest { labels: [name] };
        let response = self
            .send("add_label", &[StatusCode::UNPROCESSABLE_ENTITY], || {
                self.http.request(Method::POST, url.clone()).json(&body)
            })
            .await?;
        info!(issue = issue_url, label = name, status = response.status().as_u16(), "Added label");
        Ok(())
    }

    async fn remove_label(&self, issue_url: &str, name: &str) -> DomainResult<()> {
        let url = self.issue_labels_url(issue_url, Some(name))?;
        let response = self
            .send("remove_label", &[StatusCode::NOT_FOUND], || {
                self.http.request(Method::DELETE, url.clone())
            })
            .await?;
        info!(issue = issue_url, label = name, status = response.status().as_u16(), "Removed label");
        Ok(())
    }
}

fn parse_url(field: &str, value: &str) -> DomainResult<Url> {
    Url::parse(value).map_err(|e| DomainError::Configuration(format!("Invalid GitHub {field} '{value}': {e}")))
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> GitHubClientImpl {
        GitHubClientImpl::with_config(GitHubClientConfig {
            organization: "acme".to_string(),
            token: "ghp_test_token".to_string(),
            api_url: api_url.to_string(),
            ..GitHubClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let result = GitHubClientImpl::with_config(GitHubClientConfig::default());
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        let result = GitHubClientImpl::with_config(GitHubClientConfig {
            token: "t".to_string(),
            api_url: "not a url".to_string(),
            ..GitHubClientConfig::default()
        });
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_repo_label_url_encodes_names() {
        let url = client("https://api.github.com")
            .repo_url("widget", &["labels", "answering: not answered"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/widget/labels/answering:%20not%20answered"
        );
    }

    #[test]
    fn test_issue_labels_url() {
        let client = client("https://api.github.com");
        let url = client
            .issue_labels_url("https://github.com/acme/widget/issues/42", None)
            .unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/acme/widget/issues/42/labels");

        let url = client
            .issue_labels_url("https://github.com/acme/widget/issues/42", Some("answering: answered"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/widget/issues/42/labels/answering:%20answered"
        );
    }

    #[test]
    fn test_issue_labels_url_with_base_path() {
        let url = client("http://127.0.0.1:1234/api/v3/")
            .issue_labels_url("https://ghe.example.com/acme/widget/issues/1", None)
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1234/api/v3/repos/acme/widget/issues/1/labels");
    }

    #[test]
    fn test_issue_labels_url_rejects_non_issue_urls() {
        let client = client("https://api.github.com");
        assert!(matches!(
            client.issue_labels_url("https://github.com/acme/widget/pull/42", None),
            Err(DomainError::InvalidIssueUrl(_))
        ));
        assert!(matches!(
            client.issue_labels_url("not a url", None),
            Err(DomainError::InvalidIssueUrl(_))
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let rendered = format!("{:?}", client("https://api.github.com"));
        assert!(!rendered.contains("ghp_test_token"));
        assert!(rendered.contains("acme"));
    }
}
