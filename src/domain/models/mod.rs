//! Domain models.

pub mod config;
pub mod issue;
pub mod label;
pub mod triage;

pub use config::{
    Config, GitHubConfig, LabelSpec, LabelsConfig, LoggingConfig, RateLimitConfig, RetryConfig,
};
pub use issue::{AuthorAssociation, Comment, Issue, DEFAULT_BOT_LOGIN};
pub use label::Label;
pub use triage::{AnsweringLabels, AnsweringType, ManualLabelConfig, ManualLabelType};
