//! Triage services: classification, reconciliation and orchestration.

pub mod answering_classifier;
pub mod label_reconciler;
pub mod manual_label_classifier;
pub mod migrations;
pub mod overseer;

pub use answering_classifier::AnsweringClassifier;
pub use label_reconciler::{
    reconcile_issue_labels, reconcile_marker_label, reconcile_repo_labels, IssueLabelPlan,
    MarkerPlan, RepoLabelPlan,
};
pub use manual_label_classifier::ManualLabelClassifier;
pub use migrations::{Migration, MigrationRunner, MIGRATIONS};
pub use overseer::{ManualLabelRule, Overseer, RepoReport, RunReport};
