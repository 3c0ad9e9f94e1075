//! Row-to-entity conversion using the domain port [`SqlRow`].

use super::row_helpers::{
    opt_embedding, opt_i64, opt_json, opt_str, req_bool, req_f64, req_i64, req_json, req_parsed,
    req_str,
};
use gobby_domain::entities::{
    McpServerConfig, McpTool, McpToolEmbedding, Memory, MemoryCrossref, MemoryType, Session,
    SessionStatus, SessionUsage, Task, TaskDependency, TaskDependencyType, TaskStatus,
    TaskValidationStatus, WorkflowState,
};
use gobby_domain::error::Result;
use gobby_domain::ports::SqlRow;

/// Converts a database row to an entity type.
pub trait FromRow: Sized {
    /// Converts a database row to an instance of this type.
    fn from_row(row: &dyn SqlRow) -> Result<Self>;
}

impl FromRow for Session {
    fn from_row(row: &dyn SqlRow) -> Result<Self> {
        let usage = SessionUsage {
            input_tokens: req_i64(row, "input_tokens")?,
            output_tokens: req_i64(row, "output_tokens")?,
            cache_creation_tokens: req_i64(row, "cache_creation_tokens")?,
            cache_read_tokens: req_i64(row, "cache_read_tokens")?,
            total_cost_usd: req_f64(row, "total_cost_usd")?,
        };
        Ok(Self {
            id: req_str(row, "id")?,
            external_id: req_str(row, "external_id")?,
            machine_id: req_str(row, "machine_id")?,
            source: req_str(row, "source")?,
            project_id: req_str(row, "project_id")?,
            seq_num: req_i64(row, "seq_num")?,
            title: opt_str(row, "title")?,
            status: req_parsed::<SessionStatus>(row, "status")?,
            jsonl_path: opt_str(row, "jsonl_path")?,
            summary_path: opt_str(row, "summary_path")?,
            summary_markdown: opt_str(row, "summary_markdown")?,
            compact_markdown: opt_str(row, "compact_markdown")?,
            git_branch: opt_str(row, "git_branch")?,
            parent_session_id: opt_str(row, "parent_session_id")?,
            agent_depth: req_i64(row, "agent_depth")?,
            spawned_by_agent_id: opt_str(row, "spawned_by_agent_id")?,
            workflow_name: opt_str(row, "workflow_name")?,
            agent_run_id: opt_str(row, "agent_run_id")?,
            context_injected: req_bool(row, "context_injected")?,
            original_prompt: opt_str(row, "original_prompt")?,
            transcript_processed: req_bool(row, "transcript_processed")?,
            terminal_context: opt_str(row, "terminal_context")?,
            usage,
            model: opt_str(row, "model")?,
            created_at: req_str(row, "created_at")?,
            updated_at: req_str(row, "updated_at")?,
        })
    }
}

impl FromRow for Task {
    fn from_row(row: &dyn SqlRow) -> Result<Self> {
        Ok(Self {
            id: req_str(row, "id")?,
            project_id: req_str(row, "project_id")?,
            parent_task_id: opt_str(row, "parent_task_id")?,
            created_in_session_id: opt_str(row, "created_in_session_id")?,
            closed_in_session_id: opt_str(row, "closed_in_session_id")?,
            closed_commit_sha: opt_str(row, "closed_commit_sha")?,
            closed_at: opt_str(row, "closed_at")?,
            title: req_str(row, "title")?,
            description: opt_str(row, "description")?,
            details: opt_str(row, "details")?,
            status: req_parsed::<TaskStatus>(row, "status")?,
            priority: req_i64(row, "priority")?,
            task_type: req_str(row, "task_type")?,
            assignee: opt_str(row, "assignee")?,
            labels: req_json(row, "labels")?,
            validation_status: match opt_str(row, "validation_status")? {
                Some(raw) => Some(
                    raw.parse::<TaskValidationStatus>()
                        .map_err(gobby_domain::error::Error::database)?,
                ),
                None => None,
            },
            validation_feedback: opt_str(row, "validation_feedback")?,
            validation_criteria: opt_json(row, "validation_criteria")?,
            validation_fail_count: req_i64(row, "validation_fail_count")?,
            use_external_validator: req_bool(row, "use_external_validator")?,
            complexity_score: row.try_get_f64("complexity_score")?,
            estimated_subtasks: opt_i64(row, "estimated_subtasks")?,
            expansion_context: opt_json(row, "expansion_context")?,
            workflow_name: opt_str(row, "workflow_name")?,
            verification: opt_json(row, "verification")?,
            sequence_order: opt_i64(row, "sequence_order")?,
            commits: opt_json(row, "commits")?,
            seq_num: opt_i64(row, "seq_num")?,
            path_cache: req_str(row, "path_cache")?,
            escalated_at: opt_str(row, "escalated_at")?,
            escalation_reason: opt_str(row, "escalation_reason")?,
            github_issue_number: opt_i64(row, "github_issue_number")?,
            github_pr_number: opt_i64(row, "github_pr_number")?,
            linear_issue_id: opt_str(row, "linear_issue_id")?,
            created_at: req_str(row, "created_at")?,
            updated_at: req_str(row, "updated_at")?,
        })
    }
}

impl FromRow for TaskDependency {
    fn from_row(row: &dyn SqlRow) -> Result<Self> {
        Ok(Self {
            task_id: req_str(row, "task_id")?,
            depends_on: req_str(row, "depends_on")?,
            dep_type: req_parsed::<TaskDependencyType>(row, "dep_type")?,
        })
    }
}

impl FromRow for Memory {
    fn from_row(row: &dyn SqlRow) -> Result<Self> {
        Ok(Self {
            id: req_str(row, "id")?,
            project_id: opt_str(row, "project_id")?,
            memory_type: req_parsed::<MemoryType>(row, "memory_type")?,
            content: req_str(row, "content")?,
            source_type: opt_str(row, "source_type")?,
            source_session_id: opt_str(row, "source_session_id")?,
            importance: req_f64(row, "importance")?,
            access_count: req_i64(row, "access_count")?,
            last_accessed_at: opt_str(row, "last_accessed_at")?,
            embedding: opt_embedding(row, "embedding")?,
            tags: req_json(row, "tags")?,
            created_at: req_str(row, "created_at")?,
            updated_at: req_str(row, "updated_at")?,
        })
    }
}

impl FromRow for MemoryCrossref {
    fn from_row(row: &dyn SqlRow) -> Result<Self> {
        Ok(Self {
            source_id: req_str(row, "source_id")?,
            target_id: req_str(row, "target_id")?,
            similarity: req_f64(row, "similarity")?,
        })
    }
}

impl FromRow for WorkflowState {
    fn from_row(row: &dyn SqlRow) -> Result<Self> {
        Ok(Self {
            session_id: req_str(row, "session_id")?,
            workflow_name: req_str(row, "workflow_name")?,
            step: req_str(row, "step")?,
            step_entered_at: req_str(row, "step_entered_at")?,
            step_action_count: req_i64(row, "step_action_count")?,
            total_action_count: req_i64(row, "total_action_count")?,
            artifacts: req_json(row, "artifacts")?,
            observations: req_json(row, "observations")?,
            reflection_pending: req_bool(row, "reflection_pending")?,
            context_injected: req_bool(row, "context_injected")?,
            variables: req_json(row, "variables")?,
            task_list: req_json(row, "task_list")?,
            current_task_index: opt_i64(row, "current_task_index")?,
            files_modified_this_task: req_json(row, "files_modified_this_task")?,
            version: req_i64(row, "version")?,
            created_at: req_str(row, "created_at")?,
            updated_at: req_str(row, "updated_at")?,
        })
    }
}

impl FromRow for McpServerConfig {
    fn from_row(row: &dyn SqlRow) -> Result<Self> {
        Ok(Self {
            id: req_str(row, "id")?,
            name: req_str(row, "name")?,
            project_id: req_str(row, "project_id")?,
            transport: req_parsed(row, "transport")?,
            url: opt_str(row, "url")?,
            command: opt_str(row, "command")?,
            args: opt_json(row, "args")?,
            env: opt_json(row, "env")?,
            headers: opt_json(row, "headers")?,
            enabled: req_bool(row, "enabled")?,
            description: opt_str(row, "description")?,
            created_at: req_str(row, "created_at")?,
            updated_at: req_str(row, "updated_at")?,
        })
    }
}

impl FromRow for McpTool {
    fn from_row(row: &dyn SqlRow) -> Result<Self> {
        Ok(Self {
            id: req_str(row, "id")?,
            mcp_server_id: req_str(row, "mcp_server_id")?,
            name: req_str(row, "name")?,
            description: opt_str(row, "description")?,
            input_schema: opt_json(row, "input_schema")?,
            created_at: req_str(row, "created_at")?,
            updated_at: req_str(row, "updated_at")?,
        })
    }
}

impl FromRow for McpToolEmbedding {
    fn from_row(row: &dyn SqlRow) -> Result<Self> {
        Ok(Self {
            tool_id: req_str(row, "tool_id")?,
            embedding: opt_embedding(row, "embedding")?.unwrap_or_default(),
            text_hash: req_str(row, "text_hash")?,
            created_at: req_str(row, "created_at")?,
        })
    }
}
