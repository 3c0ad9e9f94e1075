use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::constants::ORPHANED_PROJECT_ID;

/// Root of scoping for sessions, tasks, memories, and MCP servers.
///
/// A synthetic project with id [`ORPHANED_PROJECT_ID`] always exists to receive
/// sessions whose original project has been deleted.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    /// Unique identifier.
    pub id: String,
    /// Unique display name.
    pub name: String,
    /// Absolute path to the repository root on this machine.
    pub repo_path: String,
    /// Optional `owner/repo` GitHub slug.
    pub github_repo: Option<String>,
    /// Optional Linear team id for issue sync.
    pub linear_team_id: Option<String>,
    /// Creation timestamp, ISO-8601 UTC.
    pub created_at: String,
    /// Last-update timestamp, ISO-8601 UTC.
    pub updated_at: String,
}

impl Project {
    /// Returns `true` if `id` is the fixed id of the synthetic orphaned project.
    #[must_use]
    pub fn is_orphaned_id(id: &str) -> bool {
        id == ORPHANED_PROJECT_ID
    }
}

crate::impl_table_schema!(Project, "projects",
    columns: [
        ("id", Text, pk),
        ("name", Text, unique),
        ("repo_path", Text),
        ("github_repo", Text, nullable),
        ("linear_team_id", Text, nullable),
        ("created_at", Text),
        ("updated_at", Text),
    ],
);
