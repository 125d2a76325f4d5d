//! Overseer: applies triage to every repository of an organization.
//!
//! Repositories are processed one at a time, and inside a repository
//! issues are processed one at a time: all removals for an issue are
//! applied before its add, and before the next issue is touched.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::errors::DomainResult;
use crate::domain::models::{AnsweringLabels, AnsweringType, Issue, Label, ManualLabelConfig};
use crate::domain::ports::GitHubClient;

use super::answering_classifier::AnsweringClassifier;
use super::label_reconciler::{
    reconcile_issue_labels, reconcile_marker_label, reconcile_repo_labels,
};
use super::manual_label_classifier::ManualLabelClassifier;

/// A manual label family together with its resolved marker label.
#[derive(Debug, Clone)]
pub struct ManualLabelRule {
    /// Family to check
    pub config: ManualLabelConfig,
    /// `missing: <prefix>` label added to issues without the family
    pub marker: Label,
}

impl ManualLabelRule {
    /// Build the rule and its marker label
    pub fn new(config: ManualLabelConfig, marker_color: &str) -> Self {
        let marker = Label::new(config.marker_name(), marker_color);
        Self { config, marker }
    }
}

/// What happened in one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoReport {
    /// Repository name
    pub repository: String,
    /// Repository labels deleted for having the wrong colour
    pub labels_deleted: usize,
    /// Repository labels created or recreated
    pub labels_created: usize,
    /// Issues reported by a member with no outsider reply
    pub ours: usize,
    /// Issues where a member spoke last
    pub answered: usize,
    /// Issues still waiting for a member
    pub not_answered: usize,
    /// Labels removed from issues
    pub labels_removed: usize,
    /// Label adds sent for issues
    pub labels_added: usize,
    /// Marker labels added for missing manual labels
    pub missing_markers: usize,
}

impl RepoReport {
    fn new(repository: &str) -> Self {
        Self {
            repository: repository.to_string(),
            ..Self::default()
        }
    }

    fn count(&mut self, answering_type: AnsweringType) {
        match answering_type {
            AnsweringType::Ours => self.ours += 1,
            AnsweringType::Answered => self.answered += 1,
            AnsweringType::NotAnswered => self.not_answered += 1,
        }
    }
}

/// What happened in a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// One report per repository, in processing order
    pub repositories: Vec<RepoReport>,
}

impl RunReport {
    /// Total open issues triaged
    pub fn issues(&self) -> usize {
        self.repositories
            .iter()
            .map(|repo| repo.ours + repo.answered + repo.not_answered)
            .sum()
    }
}

/// Orchestrates label reconciliation and triage over repositories.
pub struct Overseer {
    client: Arc<dyn GitHubClient>,
    classifier: AnsweringClassifier,
    manual_classifier: ManualLabelClassifier,
    answering_labels: AnsweringLabels,
    manual_rules: Vec<ManualLabelRule>,
}

impl Overseer {
    /// Create an overseer with no manual label rules
    pub fn new(
        client: Arc<dyn GitHubClient>,
        classifier: AnsweringClassifier,
        answering_labels: AnsweringLabels,
    ) -> Self {
        Self {
            client,
            classifier,
            manual_classifier: ManualLabelClassifier::new(),
            answering_labels,
            manual_rules: Vec::new(),
        }
    }

    /// Also flag issues missing a label from each of these families.
    #[must_use]
    pub fn with_manual_rules(mut self, manual_rules: Vec<ManualLabelRule>) -> Self {
        self.manual_rules = manual_rules;
        self
    }

    /// Labels every repository must define, answering labels first.
    pub fn desired_repo_labels(&self) -> Vec<Label> {
        let mut labels = self.answering_labels.to_vec();
        labels.extend(self.manual_rules.iter().map(|rule| rule.marker.clone()));
        labels
    }

    /// Process every repository in order.
    pub async fn update_repos(&self, repo_names: &[String]) -> DomainResult<RunReport> {
        let mut report = RunReport::default();
        for repo in repo_names {
            report.repositories.push(self.update_repo(repo).await?);
        }
        info!(
            repositories = report.repositories.len(),
            issues = report.issues(),
            "All repositories processed"
        );
        Ok(report)
    }

    /// Reconcile repository labels, then triage and relabel every open issue.
    #[instrument(skip(self))]
    pub async fn update_repo(&self, repo: &str) -> DomainResult<RepoReport> {
        let mut report = RepoReport::new(repo);
        self.update_repo_labels(repo, &mut report).await?;

        let issues = self.client.list_open_issues(repo).await?;
        info!(issues = issues.len(), "Fetched open issues");
        for issue in &issues {
            self.update_issue(issue, &mut report).await?;
        }

        info!(
            ours = report.ours,
            answered = report.answered,
            not_answered = report.not_answered,
            "Repository triaged"
        );
        Ok(report)
    }

    async fn update_repo_labels(&self, repo: &str, report: &mut RepoReport) -> DomainResult<()> {
        let actual = self.client.list_labels(repo).await?;
        let plan = reconcile_repo_labels(&self.desired_repo_labels(), &actual);
        debug!(
            to_delete = ?plan.to_delete,
            to_create = ?plan.to_create,
            "Repository label plan"
        );

        for label in &plan.to_delete {
            self.client.delete_label(repo, &label.name).await?;
        }
        for label in &plan.to_create {
            self.client.create_label(repo, label).await?;
        }

        report.labels_deleted += plan.to_delete.len();
        report.labels_created += plan.to_create.len();
        Ok(())
    }

    async fn update_issue(&self, issue: &Issue, report: &mut RepoReport) -> DomainResult<()> {
        let answering_type = self.classifier.classify(issue);
        report.count(answering_type);

        let plan = reconcile_issue_labels(
            &issue.labels,
            &self.answering_labels.to_vec(),
            self.answering_labels.for_type(answering_type),
        );
        debug!(
            issue = issue.number,
            answering = answering_type.as_str(),
            to_remove = ?plan.to_remove,
            "Issue label plan"
        );

        for label in &plan.to_remove {
            self.client.remove_label(&issue.url, &label.name).await?;
        }
        self.client.add_label(&issue.url, &plan.to_add.name).await?;
        report.labels_removed += plan.to_remove.len();
        report.labels_added += 1;

        for rule in &self.manual_rules {
            let manual_type = self.manual_classifier.classify(issue, &rule.config);
            let marker_plan = reconcile_marker_label(&issue.labels, &rule.marker, manual_type);
            if marker_plan.remove {
                self.client.remove_label(&issue.url, &rule.marker.name).await?;
                report.labels_removed += 1;
            }
            if marker_plan.add {
                self.client.add_label(&issue.url, &rule.marker.name).await?;
                report.labels_added += 1;
                report.missing_markers += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_report_counts_issues() {
        let report = RunReport {
            repositories: vec![
                RepoReport {
                    repository: "a".to_string(),
                    ours: 1,
                    answered: 2,
                    not_answered: 3,
                    ..RepoReport::default()
                },
                RepoReport {
                    repository: "b".to_string(),
                    not_answered: 4,
                    ..RepoReport::default()
                },
            ],
        };
        assert_eq!(report.issues(), 10);
    }

    #[test]
    fn test_manual_rule_marker() {
        let rule = ManualLabelRule::new(ManualLabelConfig::new("severity", "type: bug"), "d4c5f9");
        assert_eq!(rule.marker, Label::new("missing: severity", "d4c5f9"));
    }
}
