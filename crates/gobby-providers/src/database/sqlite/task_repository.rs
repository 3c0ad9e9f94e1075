//! SQLite implementation of [`TaskRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use gobby_domain::entities::{Task, TaskDependency, TaskDependencyType};
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::{DatabaseExecutor, SqlParam, TaskFilters, TaskRepository};
use serde_json::Value;

use super::query_helpers::{query_all, query_one};
use super::row_convert::FromRow;
use super::row_helpers::{opt_f64_param, opt_i64_param, opt_json_param, opt_str_param};

/// SQLite-backed [`TaskRepository`].
pub struct SqliteTaskRepository {
    executor: Arc<dyn DatabaseExecutor>,
}

impl SqliteTaskRepository {
    /// Creates a repository over the given executor.
    #[must_use]
    pub fn new(executor: Arc<dyn DatabaseExecutor>) -> Self {
        Self { executor }
    }

    async fn next_seq_num(&self, project_id: &str) -> Result<i64> {
        let row = self
            .executor
            .query_one(
                "SELECT COALESCE(MAX(seq_num), 0) + 1 AS next FROM tasks WHERE project_id = ?",
                &[SqlParam::String(project_id.to_owned())],
            )
            .await?;
        Ok(row.and_then(|r| r.try_get_i64("next").ok().flatten()).unwrap_or(1))
    }

    fn compute_path_segment(parent_path: Option<&str>, seq_num: Option<i64>) -> String {
        let segment = seq_num.map_or_else(|| "?".to_owned(), |n| n.to_string());
        match parent_path {
            Some(parent) if !parent.is_empty() => format!("{parent}/{segment}"),
            _ => format!("/{segment}"),
        }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create_task(&self, task: &Task) -> Result<Task> {
        let seq_num = self.next_seq_num(&task.project_id).await?;
        let parent_path = match &task.parent_task_id {
            Some(parent_id) => self
                .get_task(parent_id)
                .await?
                .map(|t| t.path_cache)
                .unwrap_or_default(),
            None => String::new(),
        };
        let path_cache = Self::compute_path_segment(Some(&parent_path), Some(seq_num));

        self.executor
            .execute(
                "INSERT INTO tasks (\
                    id, project_id, parent_task_id, created_in_session_id, closed_in_session_id, \
                    closed_commit_sha, closed_at, title, description, details, status, priority, \
                    task_type, assignee, labels, validation_status, validation_feedback, \
                    validation_criteria, validation_fail_count, use_external_validator, \
                    complexity_score, estimated_subtasks, expansion_context, workflow_name, \
                    verification, sequence_order, commits, seq_num, path_cache, escalated_at, \
                    escalation_reason, github_issue_number, github_pr_number, linear_issue_id, \
                    created_at, updated_at\
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, \
                    ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                &[
                    SqlParam::String(task.id.clone()),
                    SqlParam::String(task.project_id.clone()),
                    opt_str_param(task.parent_task_id.as_ref()),
                    opt_str_param(task.created_in_session_id.as_ref()),
                    opt_str_param(task.closed_in_session_id.as_ref()),
                    opt_str_param(task.closed_commit_sha.as_ref()),
                    opt_str_param(task.closed_at.as_ref()),
                    SqlParam::String(task.title.clone()),
                    opt_str_param(task.description.as_ref()),
                    opt_str_param(task.details.as_ref()),
                    SqlParam::String(task.status.as_str().to_owned()),
                    SqlParam::I64(i64::from(task.priority)),
                    SqlParam::String(task.task_type.clone()),
                    opt_str_param(task.assignee.as_ref()),
                    SqlParam::String(task.labels.to_string()),
                    task.validation_status
                        .map_or(SqlParam::Null, |v| SqlParam::String(v.as_str().to_owned())),
                    opt_str_param(task.validation_feedback.as_ref()),
                    opt_json_param(task.validation_criteria.as_ref())?,
                    SqlParam::I64(i64::from(task.validation_fail_count)),
                    SqlParam::I64(i64::from(task.use_external_validator)),
                    opt_f64_param(task.complexity_score),
                    opt_i64_param(task.estimated_subtasks.map(i64::from)),
                    opt_json_param(task.expansion_context.as_ref())?,
                    opt_str_param(task.workflow_name.as_ref()),
                    opt_json_param(task.verification.as_ref())?,
                    opt_i64_param(task.sequence_order.map(i64::from)),
                    opt_json_param(task.commits.as_ref())?,
                    SqlParam::I64(seq_num),
                    SqlParam::String(path_cache),
                    opt_str_param(task.escalated_at.as_ref()),
                    opt_str_param(task.escalation_reason.as_ref()),
                    opt_i64_param(task.github_issue_number),
                    opt_i64_param(task.github_pr_number),
                    opt_str_param(task.linear_issue_id.as_ref()),
                    SqlParam::String(task.created_at.clone()),
                    SqlParam::String(task.updated_at.clone()),
                ],
            )
            .await?;

        self.get_task(&task.id)
            .await?
            .ok_or_else(|| Error::storage_consistency("task vanished immediately after insert"))
    }

    async fn update_task(&self, id: &str, fields: Value) -> Result<Option<Task>> {
        let Value::Object(map) = fields else {
            return Err(Error::invalid_argument("update_task fields must be an object"));
        };
        if map.is_empty() {
            return self.get_task(id).await;
        }

        let mut set_clauses = Vec::with_capacity(map.len() + 1);
        let mut params: Vec<SqlParam> = Vec::with_capacity(map.len() + 2);
        let mut parent_changed = false;

        for (column, value) in &map {
            set_clauses.push(format!("{column} = ?"));
            params.push(json_value_to_param(value)?);
            if column == "parent_task_id" {
                parent_changed = true;
            }
        }
        set_clauses.push("updated_at = ?".to_owned());
        params.push(SqlParam::String(chrono::Utc::now().to_rfc3339()));
        params.push(SqlParam::String(id.to_owned()));

        let sql = format!("UPDATE tasks SET {} WHERE id = ?", set_clauses.join(", "));
        self.executor.execute(&sql, &params).await?;

        if parent_changed {
            self.update_path_cache(id).await?;
        }

        self.get_task(id).await
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        self.executor
            .execute("DELETE FROM tasks WHERE id = ?", &[SqlParam::String(id.to_owned())])
            .await?;
        Ok(())
    }

    async fn get_task(&self, id: &str) -> Result<Option<Task>> {
        query_one(
            &self.executor,
            "SELECT * FROM tasks WHERE id = ?",
            &[SqlParam::String(id.to_owned())],
            Task::from_row,
        )
        .await
    }

    async fn list_tasks(&self, project_id: &str, filters: TaskFilters) -> Result<Vec<Task>> {
        let mut sql = "SELECT * FROM tasks WHERE project_id = ?".to_owned();
        let mut params = vec![SqlParam::String(project_id.to_owned())];

        if let Some(status) = filters.status {
            sql.push_str(" AND status = ?");
            params.push(SqlParam::String(status.as_str().to_owned()));
        }
        if let Some(parent_task_id) = &filters.parent_task_id {
            sql.push_str(" AND parent_task_id = ?");
            params.push(SqlParam::String(parent_task_id.clone()));
        }
        if let Some(assignee) = &filters.assignee {
            sql.push_str(" AND assignee = ?");
            params.push(SqlParam::String(assignee.clone()));
        }
        if let Some(task_type) = &filters.task_type {
            sql.push_str(" AND task_type = ?");
            params.push(SqlParam::String(task_type.clone()));
        }
        sql.push_str(" ORDER BY seq_num ASC");
        if let Some(limit) = filters.limit {
            use std::fmt::Write;
            let _ = write!(sql, " LIMIT {limit}");
        }

        query_all(&self.executor, &sql, &params, Task::from_row, "task").await
    }

    async fn add_dependency(
        &self,
        task_id: &str,
        depends_on: &str,
        dep_type: TaskDependencyType,
    ) -> Result<TaskDependency> {
        self.executor
            .execute(
                "INSERT INTO task_dependencies (task_id, depends_on, dep_type) VALUES (?, ?, ?)",
                &[
                    SqlParam::String(task_id.to_owned()),
                    SqlParam::String(depends_on.to_owned()),
                    SqlParam::String(dep_type.as_str().to_owned()),
                ],
            )
            .await?;
        Ok(TaskDependency {
            task_id: task_id.to_owned(),
            depends_on: depends_on.to_owned(),
            dep_type,
        })
    }

    async fn update_path_cache(&self, id: &str) -> Result<()> {
        let Some(task) = self.get_task(id).await? else {
            return Ok(());
        };
        let parent_path = match &task.parent_task_id {
            Some(parent_id) => self
                .get_task(parent_id)
                .await?
                .map(|t| t.path_cache)
                .unwrap_or_default(),
            None => String::new(),
        };
        let path_cache = Self::compute_path_segment(Some(&parent_path), task.seq_num);
        self.executor
            .execute(
                "UPDATE tasks SET path_cache = ? WHERE id = ?",
                &[SqlParam::String(path_cache), SqlParam::String(id.to_owned())],
            )
            .await?;

        let children = query_all(
            &self.executor,
            "SELECT * FROM tasks WHERE parent_task_id = ?",
            &[SqlParam::String(id.to_owned())],
            Task::from_row,
            "task",
        )
        .await?;
        for child in children {
            Box::pin(self.update_path_cache(&child.id)).await?;
        }
        Ok(())
    }
}

fn json_value_to_param(value: &Value) -> Result<SqlParam> {
    Ok(match value {
        Value::Null => SqlParam::Null,
        Value::String(s) => SqlParam::String(s.clone()),
        Value::Bool(b) => SqlParam::I64(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlParam::I64(i)
            } else if let Some(f) = n.as_f64() {
                SqlParam::String(f.to_string())
            } else {
                SqlParam::String(n.to_string())
            }
        }
        Value::Array(_) | Value::Object(_) => SqlParam::String(value.to_string()),
    })
}
