//! Triage outcomes and the label families they map onto.

use serde::{Deserialize, Serialize};

use super::label::Label;

/// Whether an issue still waits for a reply from the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnsweringType {
    /// Reported by a member and no outsider has joined the conversation
    Ours,
    /// A member had the last word
    Answered,
    /// An outsider had the last word, or nobody replied at all
    NotAnswered,
}

impl AnsweringType {
    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ours => "ours",
            Self::Answered => "answered",
            Self::NotAnswered => "not_answered",
        }
    }
}

/// Whether an issue carries a label from a manual label family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualLabelType {
    /// Labelled, or outside the family's parent scope
    Existent,
    /// In scope and still missing a `<prefix>: <value>` label
    NonExistent,
}

/// One manually assigned label family, e.g. `severity: major`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualLabelConfig {
    /// Family prefix; members are named `"<prefix>: <value>"`
    pub prefix: String,
    /// Only issues carrying this label are checked; empty means all issues
    #[serde(default)]
    pub parent_label_name: String,
}

impl ManualLabelConfig {
    /// Create a family config; pass an empty parent to check every issue
    pub fn new(prefix: impl Into<String>, parent_label_name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            parent_label_name: parent_label_name.into(),
        }
    }

    /// The `"<prefix>: "` string every family member starts with.
    pub fn member_prefix(&self) -> String {
        format!("{}: ", self.prefix)
    }

    /// Name of the marker label flagging issues that miss this family.
    pub fn marker_name(&self) -> String {
        format!("missing: {}", self.prefix)
    }
}

/// The three labels mirroring [`AnsweringType`] on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweringLabels {
    /// Reported by the organization
    pub ours: Label,
    /// A member had the last word
    pub answered: Label,
    /// Waiting for a member
    pub not_answered: Label,
}

impl AnsweringLabels {
    /// Label for one triage outcome
    pub fn for_type(&self, answering_type: AnsweringType) -> &Label {
        match answering_type {
            AnsweringType::Ours => &self.ours,
            AnsweringType::Answered => &self.answered,
            AnsweringType::NotAnswered => &self.not_answered,
        }
    }

    /// All three labels in their canonical order.
    pub fn to_vec(&self) -> Vec<Label> {
        vec![
            self.ours.clone(),
            self.answered.clone(),
            self.not_answered.clone(),
        ]
    }
}
