//! GitHub REST and GraphQL payloads.
//!
//! These structs map to the GitHub JSON payloads and are converted into
//! domain models at the adapter boundary; they are not part of the
//! public domain model.

use serde::{Deserialize, Serialize};

use crate::domain::models::{AuthorAssociation, Comment, Issue, Label};

/// A repository returned by `GET /orgs/{org}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

/// A label returned by `GET /repos/{owner}/{repo}/labels`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubLabel {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl From<GitHubLabel> for Label {
    fn from(label: GitHubLabel) -> Self {
        Self::new(label.name, label.color)
    }
}

/// Request body for creating a repository label.
#[derive(Debug, Clone, Serialize)]
pub struct CreateLabelRequest<'a> {
    pub name: &'a str,
    pub color: &'a str,
}

/// Request body for renaming a repository label.
#[derive(Debug, Clone, Serialize)]
pub struct RenameLabelRequest<'a> {
    pub new_name: &'a str,
}

/// Request body for adding labels to an issue.
#[derive(Debug, Clone, Serialize)]
pub struct AddLabelsRequest<'a> {
    pub labels: [&'a str; 1],
}

/// Open issues of one repository, newest comments last.
pub const OPEN_ISSUES_QUERY: &str = r"query ($organization: String!, $repoName: String!, $cursor: String, $pageSize: Int!) {
  repository(owner: $organization, name: $repoName) {
    issues(first: $pageSize, after: $cursor, states: OPEN) {
      pageInfo {
        hasNextPage
        endCursor
      }
      edges {
        node {
          title
          url
          number
          authorAssociation
          labels(first: 100) {
            edges {
              node {
                name
                color
              }
            }
          }
          comments(last: 100) {
            edges {
              node {
                authorAssociation
                author {
                  login
                }
              }
            }
          }
        }
      }
    }
  }
}";

/// GraphQL request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// Variables for [`OPEN_ISSUES_QUERY`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenIssuesVariables<'a> {
    pub organization: &'a str,
    pub repo_name: &'a str,
    pub cursor: Option<&'a str>,
    pub page_size: u32,
}

/// GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenIssuesData {
    pub repository: Option<RepositoryIssues>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryIssues {
    pub issues: IssueConnection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueConnection {
    pub page_info: PageInfo,
    #[serde(default)]
    pub edges: Vec<Edge<IssueNode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub title: String,
    pub url: String,
    pub number: u64,
    pub author_association: AuthorAssociation,
    #[serde(default)]
    pub labels: Option<Connection<GitHubLabel>>,
    #[serde(default)]
    pub comments: Option<Connection<CommentNode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub author_association: AuthorAssociation,
    /// Null for deleted accounts
    #[serde(default)]
    pub author: Option<CommentAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentAuthor {
    pub login: String,
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        let labels = node
            .labels
            .map(|connection| connection.edges)
            .unwrap_or_default()
            .into_iter()
            .map(|edge| Label::from(edge.node))
            .collect();
        let comments = node
            .comments
            .map(|connection| connection.edges)
            .unwrap_or_default()
            .into_iter()
            .map(|edge| {
                Comment::new(
                    edge.node.author_association,
                    edge.node.author.map(|author| author.login).unwrap_or_default(),
                )
            })
            .collect();

        Self {
            title: node.title,
            url: node.url,
            number: node.number,
            author_association: node.author_association,
            labels,
            comments,
        }
    }
}
