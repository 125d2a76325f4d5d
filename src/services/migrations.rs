//! One-off label migrations.
//!
//! Each migration is a list of label renames applied to every
//! repository. Renaming a label that does not exist is a no-op, so
//! migrations can be re-run safely.

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::ports::GitHubClient;

/// A named set of label renames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    /// Unique id, dated
    pub id: &'static str,
    /// `(old_name, new_name)` pairs, applied in order
    pub renames: &'static [(&'static str, &'static str)],
}

/// Every known migration, oldest first.
pub const MIGRATIONS: &[Migration] = &[Migration {
    id: "2020-07-13-issue-type",
    renames: &[
        ("bug", "type: bug"),
        ("enhancement", "type: enhancement"),
        ("question", "type: question"),
    ],
}];

/// Applies migrations through the GitHub port.
pub struct MigrationRunner {
    client: Arc<dyn GitHubClient>,
}

impl MigrationRunner {
    /// Create a runner using `client`
    pub fn new(client: Arc<dyn GitHubClient>) -> Self {
        Self { client }
    }

    /// Rename `old_name` to `new_name` in each repository.
    pub async fn rename_label_in_each_repo(
        &self,
        repo_names: &[String],
        old_name: &str,
        new_name: &str,
    ) -> DomainResult<()> {
        for repo in repo_names {
            self.client.rename_label(repo, old_name, new_name).await?;
        }
        Ok(())
    }

    /// Run `migrations` in order; returns the ids that were applied.
    pub async fn up(
        &self,
        migrations: &[Migration],
        repo_names: &[String],
    ) -> DomainResult<Vec<&'static str>> {
        let mut applied = Vec::with_capacity(migrations.len());
        for migration in migrations {
            for (old_name, new_name) in migration.renames {
                self.rename_label_in_each_repo(repo_names, old_name, new_name)
                    .await?;
            }
            info!(migration = migration.id, "Migration finished");
            applied.push(migration.id);
        }
        info!(count = applied.len(), "All migrations finished");
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_type_migration_renames() {
        let migration = MIGRATIONS
            .iter()
            .find(|m| m.id == "2020-07-13-issue-type")
            .unwrap();
        assert_eq!(
            migration.renames,
            &[
                ("bug", "type: bug"),
                ("enhancement", "type: enhancement"),
                ("question", "type: question"),
            ]
        );
    }

    #[test]
    fn test_migration_ids_are_unique() {
        let mut ids: Vec<_> = MIGRATIONS.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MIGRATIONS.len());
    }
}
