//! Issue snapshot model.
//!
//! Issues are fetched once per run and never mutated; triage and
//! reconciliation only produce commands for the port to execute.

use serde::{Deserialize, Serialize};

use super::label::Label;

/// Login of the issue-bounty bot whose comments carry no triage signal.
pub const DEFAULT_BOT_LOGIN: &str = "issuehunt-app";

/// Relationship of an author to the organization owning the repository.
///
/// Only [`AuthorAssociation::Member`] counts as "one of us" for triage.
/// Unrecognised values deserialize to [`AuthorAssociation::Unknown`] and
/// are treated like any other non-member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorAssociation {
    /// Member of the organization
    Member,
    /// Owner of the repository
    Owner,
    /// Invited collaborator
    Collaborator,
    /// Has contributed before
    Contributor,
    /// First contribution to this repository
    FirstTimeContributor,
    /// First contribution on GitHub
    FirstTimer,
    /// Placeholder for an imported user
    Mannequin,
    /// No relationship
    #[default]
    None,
    /// Any value GitHub adds later
    #[serde(other)]
    Unknown,
}

impl AuthorAssociation {
    /// Whether the author counts as one of the organization
    pub const fn is_member(self) -> bool {
        matches!(self, Self::Member)
    }

    /// GitHub's spelling of the association
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "MEMBER",
            Self::Owner => "OWNER",
            Self::Collaborator => "COLLABORATOR",
            Self::Contributor => "CONTRIBUTOR",
            Self::FirstTimeContributor => "FIRST_TIME_CONTRIBUTOR",
            Self::FirstTimer => "FIRST_TIMER",
            Self::Mannequin => "MANNEQUIN",
            Self::None => "NONE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for AuthorAssociation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "MEMBER" => Self::Member,
            "OWNER" => Self::Owner,
            "COLLABORATOR" => Self::Collaborator,
            "CONTRIBUTOR" => Self::Contributor,
            "FIRST_TIME_CONTRIBUTOR" => Self::FirstTimeContributor,
            "FIRST_TIMER" => Self::FirstTimer,
            "MANNEQUIN" => Self::Mannequin,
            "NONE" => Self::None,
            _ => Self::Unknown,
        })
    }
}

/// A comment on an issue, reduced to what triage needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment author's association
    pub author_association: AuthorAssociation,
    /// Empty for comments by deleted ("ghost") accounts
    pub author_login: String,
}

impl Comment {
    /// Create a comment
    pub fn new(author_association: AuthorAssociation, author_login: impl Into<String>) -> Self {
        Self {
            author_association,
            author_login: author_login.into(),
        }
    }
}

/// An open issue with its labels and comments (oldest comment first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue title
    pub title: String,
    /// HTML URL; the identity used to target label mutations
    pub url: String,
    /// Issue number within its repository
    pub number: u64,
    /// Issue author's association
    pub author_association: AuthorAssociation,
    #[serde(default)]
    /// Labels currently on the issue
    pub labels: Vec<Label>,
    #[serde(default)]
    /// Comments, oldest first
    pub comments: Vec<Comment>,
}

impl Issue {
    /// Whether a label with exactly this name is on the issue.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_association_deserialization() {
        let member: AuthorAssociation = serde_json::from_str("\"MEMBER\"").unwrap();
        assert_eq!(member, AuthorAssociation::Member);
        let first: AuthorAssociation =
            serde_json::from_str("\"FIRST_TIME_CONTRIBUTOR\"").unwrap();
        assert_eq!(first, AuthorAssociation::FirstTimeContributor);
    }

    #[test]
    fn test_unknown_association_is_not_member() {
        let unknown: AuthorAssociation = serde_json::from_str("\"SPONSOR\"").unwrap();
        assert_eq!(unknown, AuthorAssociation::Unknown);
        assert!(!unknown.is_member());
        assert_eq!("SPONSOR".parse::<AuthorAssociation>(), Ok(AuthorAssociation::Unknown));
    }

    #[test]
    fn test_owner_is_not_member() {
        assert!(!AuthorAssociation::Owner.is_member());
        assert!(AuthorAssociation::Member.is_member());
    }

    #[test]
    fn test_has_label_is_exact() {
        let issue = Issue {
            title: "title".to_string(),
            url: "https://github.com/org/repo/issues/1".to_string(),
            number: 1,
            author_association: AuthorAssociation::None,
            labels: vec![Label::named("severity: major")],
            comments: vec![],
        };
        assert!(issue.has_label("severity: major"));
        assert!(!issue.has_label("Severity: major"));
    }
}
