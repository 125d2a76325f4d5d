//! Label reconciliation.
//!
//! Pure functions computing the label commands that bring GitHub to the
//! desired state. Nothing here talks to GitHub; the [`Overseer`] applies
//! the resulting plans through the port.
//!
//! [`Overseer`]: super::overseer::Overseer

use crate::domain::models::{Label, ManualLabelType};

/// Repository label commands, applied deletes first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoLabelPlan {
    /// Desired labels whose name exists with the wrong colour
    pub to_delete: Vec<Label>,
    /// Recoloured labels followed by labels missing entirely
    pub to_create: Vec<Label>,
}

impl RepoLabelPlan {
    /// Whether the repository is already in the desired state
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_create.is_empty()
    }
}

/// Issue label commands: every removal, then one (idempotent) add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLabelPlan {
    /// Managed labels to take off the issue
    pub to_remove: Vec<Label>,
    /// The label the issue must carry
    pub to_add: Label,
}

/// Marker label commands for one manual label family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerPlan {
    /// Take the marker off the issue
    pub remove: bool,
    /// Put the marker on the issue
    pub add: bool,
}

/// Compare desired repository labels against the actual ones.
///
/// Names match case-insensitively and colours ignore hex digit case
/// (`A0A000` equals `a0a000`). A desired label present with another
/// colour is deleted by name and recreated; a desired label absent
/// altogether is created. Both lists follow the order of `desired`, with
/// recreated labels ahead of missing ones in `to_create`.
pub fn reconcile_repo_labels(desired: &[Label], actual: &[Label]) -> RepoLabelPlan {
    let to_delete: Vec<Label> = desired
        .iter()
        .filter(|label| {
            actual
                .iter()
                .any(|existing| label.same_name_ignoring_case(existing) && !label.same_color(existing))
        })
        .cloned()
        .collect();

    let missing = desired.iter().filter(|label| {
        !actual
            .iter()
            .any(|existing| label.same_name_ignoring_case(existing))
    });

    let mut to_create = to_delete.clone();
    to_create.extend(missing.cloned());

    RepoLabelPlan {
        to_delete,
        to_create,
    }
}

/// Compute the answering label changes for one issue.
///
/// Every current label belonging to `managed` (exact name match) other
/// than `to_add` is removed. `to_add` is always returned, even when the
/// issue already carries it.
pub fn reconcile_issue_labels(current: &[Label], managed: &[Label], to_add: &Label) -> IssueLabelPlan {
    let to_remove = current
        .iter()
        .filter(|label| label.name != to_add.name)
        .filter(|label| managed.iter().any(|candidate| candidate.name == label.name))
        .cloned()
        .collect();

    IssueLabelPlan {
        to_remove,
        to_add: to_add.clone(),
    }
}

/// Compute the `missing: <prefix>` marker changes for one issue.
pub fn reconcile_marker_label(current: &[Label], marker: &Label, manual_type: ManualLabelType) -> MarkerPlan {
    match manual_type {
        ManualLabelType::NonExistent => MarkerPlan {
            remove: false,
            add: true,
        },
        ManualLabelType::Existent => MarkerPlan {
            remove: current.iter().any(|label| label.name == marker.name),
            add: false,
        },
    }
}
