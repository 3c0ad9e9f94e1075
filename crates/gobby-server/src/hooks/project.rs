//! Project resolution (pipeline step 3): reads `.gobby/project.json` under
//! the event's cwd, auto-initializing both the marker file and the store
//! row the first time a directory is seen.

use std::path::Path;
use std::sync::Arc;

use gobby_domain::entities::Project;
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::infrastructure::database::{DatabaseExecutor, SqlParam};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct ProjectMarker {
    id: String,
}

/// Resolves or auto-initializes the project owning a working directory.
pub struct ProjectResolver {
    executor: Arc<dyn DatabaseExecutor>,
}

impl ProjectResolver {
    #[must_use]
    pub fn new(executor: Arc<dyn DatabaseExecutor>) -> Self {
        Self { executor }
    }

    /// Resolves the project for `cwd`, creating both the marker file and
    /// store row on first sight of this directory.
    pub async fn resolve(&self, cwd: &str) -> Result<Project> {
        let marker_path = Path::new(cwd).join(".gobby").join("project.json");

        if let Ok(content) = tokio::fs::read_to_string(&marker_path).await {
            if let Ok(marker) = serde_json::from_str::<ProjectMarker>(&content) {
                if let Some(project) = self.fetch(&marker.id).await? {
                    return Ok(project);
                }
            }
        }

        self.auto_initialize(cwd, &marker_path).await
    }

    async fn fetch(&self, id: &str) -> Result<Option<Project>> {
        let row = self
            .executor
            .query_one(
                "SELECT id, name, repo_path, github_repo, linear_team_id, created_at, updated_at FROM projects WHERE id = ?",
                &[SqlParam::String(id.to_owned())],
            )
            .await?;
        let Some(row) = row else { return Ok(None) };
        Ok(Some(Project {
            id: row.try_get_string("id")?.unwrap_or_default(),
            name: row.try_get_string("name")?.unwrap_or_default(),
            repo_path: row.try_get_string("repo_path")?.unwrap_or_default(),
            github_repo: row.try_get_string("github_repo")?,
            linear_team_id: row.try_get_string("linear_team_id")?,
            created_at: row.try_get_string("created_at")?.unwrap_or_default(),
            updated_at: row.try_get_string("updated_at")?.unwrap_or_default(),
        }))
    }

    async fn auto_initialize(&self, cwd: &str, marker_path: &Path) -> Result<Project> {
        let id = uuid::Uuid::new_v4().to_string();
        let name = Path::new(cwd)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| id.clone());
        let now = chrono::Utc::now().to_rfc3339();

        self.executor
            .execute(
                "INSERT INTO projects (id, name, repo_path, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
                &[
                    SqlParam::String(id.clone()),
                    SqlParam::String(name.clone()),
                    SqlParam::String(cwd.to_owned()),
                    SqlParam::String(now.clone()),
                    SqlParam::String(now.clone()),
                ],
            )
            .await?;

        if let Some(parent) = marker_path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::debug!(error = %e, "could not create .gobby directory for project marker");
            } else {
                let marker = serde_json::to_string_pretty(&ProjectMarker { id: id.clone() })
                    .map_err(|e| Error::io(e.to_string()))?;
                if let Err(e) = tokio::fs::write(marker_path, marker).await {
                    tracing::debug!(error = %e, "could not write project marker file");
                }
            }
        }

        Ok(Project {
            id,
            name,
            repo_path: cwd.to_owned(),
            github_repo: None,
            linear_team_id: None,
            created_at: now.clone(),
            updated_at: now,
        })
    }
}
