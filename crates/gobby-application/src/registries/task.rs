//! Task Registry — thin business logic over [`TaskRepository`].

use std::sync::Arc;

use gobby_domain::entities::{Task, TaskDependency, TaskDependencyType};
use gobby_domain::error::Result;
use gobby_domain::ports::{TaskFilters, TaskRepository};
use serde_json::Value;

/// Tracks units of work within a project and their dependency graph.
pub struct TaskRegistry {
    repository: Arc<dyn TaskRepository>,
}

impl TaskRegistry {
    /// Builds a registry over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Creates a new task.
    pub async fn create_task(&self, task: &Task) -> Result<Task> {
        self.repository.create_task(task).await
    }

    /// Applies a partial update, recomputing `path_cache` if the parent changed.
    pub async fn update_task(&self, id: &str, fields: Value) -> Result<Option<Task>> {
        self.repository.update_task(id, fields).await
    }

    /// Deletes a task.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.repository.delete_task(id).await
    }

    /// Fetches a task by id.
    pub async fn get_task(&self, id: &str) -> Result<Option<Task>> {
        self.repository.get_task(id).await
    }

    /// Lists tasks in a project matching `filters`.
    pub async fn list_tasks(&self, project_id: &str, filters: TaskFilters) -> Result<Vec<Task>> {
        self.repository.list_tasks(project_id, filters).await
    }

    /// Records a dependency edge.
    pub async fn add_dependency(
        &self,
        task_id: &str,
        depends_on: &str,
        dep_type: TaskDependencyType,
    ) -> Result<TaskDependency> {
        self.repository
            .add_dependency(task_id, depends_on, dep_type)
            .await
    }

    /// Recomputes `path_cache` for `id` and its descendants.
    pub async fn update_path_cache(&self, id: &str) -> Result<()> {
        self.repository.update_path_cache(id).await
    }

    /// Persists a batch of tasks produced by a workflow run, returning the
    /// newly created task ids in order.
    pub async fn persist_tasks(&self, tasks: Vec<Task>) -> Result<Vec<String>> {
        let mut ids = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let created = self.repository.create_task(task).await?;
            ids.push(created.id);
        }
        Ok(ids)
    }
}
