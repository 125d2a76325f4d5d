//! Domain errors for the issue overseer.

use thiserror::Error;

/// Domain-level errors that can occur while talking to GitHub or
/// applying a label plan.
///
/// The classifiers and reconcilers never produce these; they are total
/// functions. Every variant comes from the port boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("GitHub request failed during {operation}: {message}")]
    /// The request never got a response
    GitHubRequest { operation: String, message: String },

    #[error("GitHub {operation} returned {status}: {body}")]
    /// GitHub answered with a status the operation does not accept
    GitHubStatus {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("GitHub GraphQL query failed: {0}")]
    /// The GraphQL response carried errors or no data
    GraphQl(String),

    #[error("Invalid issue URL: {0}")]
    /// An issue URL that does not look like `.../{owner}/{repo}/issues/{n}`
    InvalidIssueUrl(String),

    #[error("Serialization error: {0}")]
    /// A payload that could not be decoded
    Serialization(String),

    #[error("Configuration error: {0}")]
    /// Client settings that cannot work
    Configuration(String),
}

impl DomainError {
    /// Whether retrying the same request may succeed.
    ///
    /// Network failures, rate limiting (429) and server errors (5xx) are
    /// transient; everything else is permanent.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::GitHubRequest { .. } => true,
            Self::GitHubStatus { status, .. } => *status == 429 || *status >= 500,
            Self::GraphQl(_)
            | Self::InvalidIssueUrl(_)
            | Self::Serialization(_)
            | Self::Configuration(_) => false,
        }
    }
}

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> DomainError {
        DomainError::GitHubStatus {
            operation: "list_labels".to_string(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(status(429).is_transient());
        assert!(status(502).is_transient());
        assert!(!status(401).is_transient());
        assert!(!status(422).is_transient());
        assert!(DomainError::GitHubRequest {
            operation: "add_label".to_string(),
            message: "connection reset".to_string(),
        }
        .is_transient());
        assert!(!DomainError::GraphQl("bad field".to_string()).is_transient());
    }

    #[test]
    fn test_status_display_names_operation() {
        let msg = status(404).to_string();
        assert_eq!(msg, "GitHub list_labels returned 404: ");
    }
}
