//! Workflow action handlers, grouped by concern.
//!
//! Each handler shares the signature `(ctx, params) -> Result<Option<Value>>`.
//! `Ok(None)` means "nothing to report" (not an error); `Ok(Some(error_value))`
//! is used for recoverable parameter problems; `Err` is reserved for
//! contract violations the dispatcher converts into an `{"error": ...}` value.

/// `inject_context`, `inject_message`, `switch_mode`.
pub mod context;
/// `memory_save`, `memory_recall_relevant`, `memory_sync_import`, `memory_sync_export`.
pub mod memory;
/// `generate_summary`, `generate_handoff`, `synthesize_title`, `extract_handoff_context`.
pub mod summarize;
/// `set_variable`, `increment_variable`, `save_workflow_state`, `load_workflow_state`, `mark_session_status`.
pub mod state;
/// `persist_tasks`, `update_workflow_task`.
pub mod tasks;
/// `call_mcp_tool`, `call_llm`, `start_new_session`, `webhook`.
pub mod tools;

/// `capture_artifact`, `read_artifact`, `write_todos`, `mark_todo_complete`.
pub mod artifacts;
