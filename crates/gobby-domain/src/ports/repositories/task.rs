//! Task Registry port.

use async_trait::async_trait;
use serde_json::Value;

use crate::entities::{Task, TaskDependency, TaskDependencyType, TaskStatus};
use crate::error::Result;

/// Filters accepted by [`TaskRepository::list_tasks`]. All fields are
/// optional; omitted fields are not used to narrow the result set.
#[derive(Debug, Clone, Default)]
pub struct TaskFilters {
    /// Restrict to a single lifecycle status.
    pub status: Option<TaskStatus>,
    /// Restrict to children of this task.
    pub parent_task_id: Option<String>,
    /// Restrict to a single assignee.
    pub assignee: Option<String>,
    /// Restrict to a single task type.
    pub task_type: Option<String>,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

/// Port for task persistence, dependency tracking, and path-cache maintenance.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Creates a new task. `seq_num` is allocated per-project, monotonic,
    /// and never reused.
    async fn create_task(&self, task: &Task) -> Result<Task>;

    /// Applies a partial update, expressed as already-validated column
    /// values. Recomputes `path_cache` for the task's subtree when
    /// `parent_task_id` changes.
    async fn update_task(&self, id: &str, fields: Value) -> Result<Option<Task>>;

    /// Deletes a task by id.
    async fn delete_task(&self, id: &str) -> Result<()>;

    /// Fetches a task by id.
    async fn get_task(&self, id: &str) -> Result<Option<Task>>;

    /// Lists tasks in a project matching `filters`.
    async fn list_tasks(&self, project_id: &str, filters: TaskFilters) -> Result<Vec<Task>>;

    /// Records a dependency edge. Validation history and dependency
    /// insertion are append-only.
    async fn add_dependency(
        &self,
        task_id: &str,
        depends_on: &str,
        dep_type: TaskDependencyType,
    ) -> Result<TaskDependency>;

    /// Recomputes `path_cache` for `id` and every descendant.
    async fn update_path_cache(&self, id: &str) -> Result<()>;
}
