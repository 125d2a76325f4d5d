//! Output formatting utilities for the CLI.

use comfy_table::{presets, Attribute, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use super::RunOutput;

/// Result of a command that can be printed for humans or as JSON.
pub trait CommandOutput: Serialize {
    /// Plain-text rendering
    fn to_human(&self) -> String;
    /// JSON rendering
    fn to_json(&self) -> serde_json::Value;
}

/// Print `result` to stdout in the selected format.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

fn header(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold)
}

fn count(value: usize) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                header("Repository"),
                header("Ours"),
                header("Answered"),
                header("Not answered"),
                header("Labels -/+"),
                header("Issue labels -/+"),
                header("Missing"),
            ]);

        for repo in &self.report.repositories {
            table.add_row(vec![
                Cell::new(&repo.repository),
                count(repo.ours),
                count(repo.answered),
                count(repo.not_answered),
                Cell::new(format!("{}/{}", repo.labels_deleted, repo.labels_created)),
                Cell::new(format!("{}/{}", repo.labels_removed, repo.labels_added)),
                count(repo.missing_markers),
            ]);
        }

        let mut lines = vec![table.to_string()];
        if !self.migrations_applied.is_empty() {
            lines.push(format!("Migrations applied: {}", self.migrations_applied.join(", ")));
        }
        let mut summary = format!(
            "{} issues in {} repositories of {}",
            self.report.issues(),
            self.report.repositories.len(),
            self.organization
        );
        if self.dry_run {
            summary.push_str(&format!(" (dry run, {} mutations skipped)", self.skipped_mutations));
        }
        lines.push(summary);
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
