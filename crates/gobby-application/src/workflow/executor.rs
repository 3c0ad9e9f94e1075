//! Action Executor — dispatches a named action against an [`ActionContext`].

use serde_json::{json, Value};

use crate::workflow::action_context::ActionContext;
use crate::workflow::actions::{artifacts, context, memory, state, summarize, tasks, tools};

/// Runs `action` against `ctx` with `params`, applying the catalog's
/// dispatch rules: an unknown action name logs and yields `None`; a
/// handler's `Err` is converted into an `{"error": ...}` value so the
/// engine keeps running.
pub async fn execute(ctx: &mut ActionContext, action: &str, params: &Value) -> Option<Value> {
    let result = match action {
        "inject_context" => context::inject_context(ctx, params).await,
        "inject_message" => context::inject_message(ctx, params).await,
        "switch_mode" => context::switch_mode(ctx, params).await,

        "capture_artifact" => artifacts::capture_artifact(ctx, params).await,
        "read_artifact" => artifacts::read_artifact(ctx, params).await,
        "write_todos" => artifacts::write_todos(ctx, params).await,
        "mark_todo_complete" => artifacts::mark_todo_complete(ctx, params).await,

        "generate_summary" => summarize::generate_summary(ctx, params).await,
        "generate_handoff" => summarize::generate_handoff(ctx, params).await,
        "synthesize_title" => summarize::synthesize_title(ctx, params).await,
        "extract_handoff_context" => summarize::extract_handoff_context(ctx, params).await,

        "persist_tasks" => tasks::persist_tasks(ctx, params).await,
        "update_workflow_task" => tasks::update_workflow_task(ctx, params).await,

        "set_variable" => state::set_variable(ctx, params).await,
        "increment_variable" => state::increment_variable(ctx, params).await,
        "save_workflow_state" => state::save_workflow_state(ctx, params).await,
        "load_workflow_state" => state::load_workflow_state(ctx, params).await,
        "mark_session_status" => state::mark_session_status(ctx, params).await,

        "memory_save" => memory::memory_save(ctx, params).await,
        "memory_recall_relevant" => memory::memory_recall_relevant(ctx, params).await,
        "memory_sync_import" => memory::memory_sync_import(ctx, params).await,
        "memory_sync_export" => memory::memory_sync_export(ctx, params).await,

        "call_mcp_tool" => tools::call_mcp_tool(ctx, params).await,
        "call_llm" => tools::call_llm(ctx, params).await,
        "start_new_session" => tools::start_new_session(ctx, params).await,
        "webhook" => tools::webhook(ctx, params).await,

        other => {
            tracing::warn!(action = other, "unknown workflow action");
            return None;
        }
    };

    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(action, error = %e, "workflow action failed");
            Some(json!({ "error": e.to_string() }))
        }
    }
}
