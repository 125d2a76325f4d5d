//! Manual label family checks.

use crate::domain::models::{Issue, ManualLabelConfig, ManualLabelType};

/// Service checking whether an issue carries a label from a manual
/// label family
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualLabelClassifier;

impl ManualLabelClassifier {
    /// Create a classifier
    pub const fn new() -> Self {
        Self
    }

    /// Classify one issue against one label family
    ///
    /// An issue is [`ManualLabelType::Existent`] when it carries a
    /// `"<prefix>: <value>"` label, or when the family is scoped to a
    /// parent label the issue does not carry.
    pub fn classify(&self, issue: &Issue, config: &ManualLabelConfig) -> ManualLabelType {
        let member_prefix = config.member_prefix();
        let has_prefix = issue
            .labels
            .iter()
            .any(|label| label.name.starts_with(&member_prefix));
        let out_of_scope =
            !config.parent_label_name.is_empty() && !issue.has_label(&config.parent_label_name);

        if has_prefix || out_of_scope {
            ManualLabelType::Existent
        } else {
            ManualLabelType::NonExistent
        }
    }

    /// Split issues into (with label, without label), keeping input order
    pub fn group_by_manual_label<'a>(
        &self,
        issues: &'a [Issue],
        config: &ManualLabelConfig,
    ) -> (Vec<&'a Issue>, Vec<&'a Issue>) {
        issues
            .iter()
            .partition(|issue| self.classify(issue, config) == ManualLabelType::Existent)
    }
}
