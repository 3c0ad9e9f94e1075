//! SQLite implementation of [`WorkflowRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use gobby_domain::entities::WorkflowState;
use gobby_domain::error::Result;
use gobby_domain::ports::{DatabaseExecutor, SqlParam, WorkflowRepository};

use super::query_helpers::query_one;
use super::row_convert::FromRow;
use super::row_helpers::{bool_param, opt_i64_param};

/// SQLite-backed [`WorkflowRepository`].
pub struct SqliteWorkflowRepository {
    executor: Arc<dyn DatabaseExecutor>,
}

impl SqliteWorkflowRepository {
    /// Creates a repository over the given executor.
    #[must_use]
    pub fn new(executor: Arc<dyn DatabaseExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl WorkflowRepository for SqliteWorkflowRepository {
    async fn get(&self, session_id: &str) -> Result<Option<WorkflowState>> {
        query_one(
            &self.executor,
            "SELECT * FROM workflow_states WHERE session_id = ?",
            &[SqlParam::String(session_id.to_owned())],
            WorkflowState::from_row,
        )
        .await
    }

    async fn create(&self, state: &WorkflowState) -> Result<()> {
        self.executor
            .execute(
                "INSERT INTO workflow_states (\
                    session_id, workflow_name, step, step_entered_at, step_action_count, \
                    total_action_count, artifacts, observations, reflection_pending, \
                    context_injected, variables, task_list, current_task_index, \
                    files_modified_this_task, version, created_at, updated_at\
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                &[
                    SqlParam::String(state.session_id.clone()),
                    SqlParam::String(state.workflow_name.clone()),
                    SqlParam::String(state.step.clone()),
                    SqlParam::String(state.step_entered_at.clone()),
                    SqlParam::I64(state.step_action_count),
                    SqlParam::I64(state.total_action_count),
                    SqlParam::String(state.artifacts.to_string()),
                    SqlParam::String(state.observations.to_string()),
                    bool_param(state.reflection_pending),
                    bool_param(state.context_injected),
                    SqlParam::String(state.variables.to_string()),
                    SqlParam::String(state.task_list.to_string()),
                    opt_i64_param(state.current_task_index),
                    SqlParam::String(state.files_modified_this_task.to_string()),
                    SqlParam::I64(state.version),
                    SqlParam::String(state.created_at.clone()),
                    SqlParam::String(state.updated_at.clone()),
                ],
            )
            .await?;
        Ok(())
    }

    async fn save(&self, state: &WorkflowState) -> Result<WorkflowState> {
        let next_version = state.version + 1;
        let now = chrono::Utc::now().to_rfc3339();
        self.executor
            .execute(
                "UPDATE workflow_states SET \
                    workflow_name = ?, step = ?, step_entered_at = ?, step_action_count = ?, \
                    total_action_count = ?, artifacts = ?, observations = ?, \
                    reflection_pending = ?, context_injected = ?, variables = ?, task_list = ?, \
                    current_task_index = ?, files_modified_this_task = ?, version = ?, \
                    updated_at = ? \
                 WHERE session_id = ?",
                &[
                    SqlParam::String(state.workflow_name.clone()),
                    SqlParam::String(state.step.clone()),
                    SqlParam::String(state.step_entered_at.clone()),
                    SqlParam::I64(state.step_action_count),
                    SqlParam::I64(state.total_action_count),
                    SqlParam::String(state.artifacts.to_string()),
                    SqlParam::String(state.observations.to_string()),
                    bool_param(state.reflection_pending),
                    bool_param(state.context_injected),
                    SqlParam::String(state.variables.to_string()),
                    SqlParam::String(state.task_list.to_string()),
                    opt_i64_param(state.current_task_index),
                    SqlParam::String(state.files_modified_this_task.to_string()),
                    SqlParam::I64(next_version),
                    SqlParam::String(now),
                    SqlParam::String(state.session_id.clone()),
                ],
            )
            .await?;
        self.get(&state.session_id)
            .await?
            .ok_or_else(|| gobby_domain::error::Error::storage_consistency(
                "workflow state vanished immediately after save",
            ))
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        self.executor
            .execute(
                "DELETE FROM workflow_states WHERE session_id = ?",
                &[SqlParam::String(session_id.to_owned())],
            )
            .await?;
        Ok(())
    }
}
