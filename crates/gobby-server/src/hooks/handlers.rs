//! Event-specific handler map (pipeline step 9): the per-`HookEventType`
//! behavior layered on top of the generic pipeline steps.
//!
//! Absence of a case, and any error raised within one, is fail-open — the
//! caller treats `None` and a logged error identically.

use gobby_domain::entities::{Session, SessionStatus};
use gobby_domain::value_objects::{HookEvent, HookEventType, HookResponse};
use serde_json::json;

use gobby_application::ActionContext;

use super::pipeline::HookPipelineDeps;

const ENHANCED_MESSAGE: &str = "Session enhanced by gobby";

/// Dispatches `event` to its event-specific handler, if one exists.
pub async fn handle_event(
    event: &HookEvent,
    session: Option<&Session>,
    deps: &HookPipelineDeps,
) -> Option<HookResponse> {
    match event.event_type {
        HookEventType::SessionStart => session_start(event, session, deps).await,
        HookEventType::SessionEnd => session_end(session, deps).await,
        HookEventType::PreCompact => pre_compact(event, session, deps).await,
        HookEventType::BeforeAgent
        | HookEventType::AfterAgent
        | HookEventType::BeforeTool
        | HookEventType::AfterTool
        | HookEventType::Notification => None,
    }
}

/// On `source="clear"`, also looks up a handoff parent and merges its
/// compact context. On `source="resume"` no parent lookup runs at all, so
/// a resumed session can never accidentally parent itself off its own
/// prior incarnation. `source="startup"` (the default) gets the bare
/// enhancement message.
async fn session_start(
    event: &HookEvent,
    session: Option<&Session>,
    deps: &HookPipelineDeps,
) -> Option<HookResponse> {
    let mut response = HookResponse {
        system_message: Some(ENHANCED_MESSAGE.to_owned()),
        ..HookResponse::default()
    };

    if event.data_str("source") != Some("clear") {
        return Some(response);
    }
    let session = session?;

    let parent = deps
        .session_registry
        .find_parent(&session.machine_id, &session.project_id, SessionStatus::HandoffReady, Some(&session.source))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "handoff parent lookup failed, continuing without it");
            None
        });

    if let Some(parent) = parent {
        if let Some(markdown) = parent.compact_markdown.or(parent.summary_markdown) {
            response.merge_context(&markdown);
        }
        if let Err(e) = deps
            .session_registry
            .update_parent_session_id(&session.id, &parent.id)
            .await
        {
            tracing::warn!(error = %e, "failed to link handoff parent session");
        }
    }

    Some(response)
}

/// Marks the session completed. Git-commit auto-linking is out of scope:
/// no VCS port exists anywhere in this daemon core to drive it from.
async fn session_end(session: Option<&Session>, deps: &HookPipelineDeps) -> Option<HookResponse> {
    let session = session?;
    if let Err(e) = deps
        .session_registry
        .update_status(&session.id, SessionStatus::Completed)
        .await
    {
        tracing::warn!(error = %e, "failed to mark session completed");
    }
    None
}

/// Runs the `generate_handoff` workflow action so the transcript summary
/// and `handoff_ready` status are ready before the front-end compacts.
async fn pre_compact(
    _event: &HookEvent,
    session: Option<&Session>,
    deps: &HookPipelineDeps,
) -> Option<HookResponse> {
    let session = session?;
    let Some(state) = deps
        .workflow_repository
        .get(&session.id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load workflow state for pre_compact");
            None
        })
    else {
        return None;
    };

    let mut ctx = ActionContext {
        session_id: session.id.clone(),
        state,
        event_data: json!({ "event_type": "pre_compact" }),
        session_registry: deps.session_registry.clone(),
        task_registry: deps.task_registry.clone(),
        memory_registry: deps.memory_registry.clone(),
        workflow_repository: deps.workflow_repository.clone(),
        template_engine: deps.template_engine.clone(),
        tool_proxy: deps.tool_proxy.clone(),
        llm_service: deps.llm_service.clone(),
        transcript_processor: deps.transcript_processor.clone(),
        spawner: deps.spawner.clone(),
        webhook_executor: deps
            .webhook_dispatcher
            .clone()
            .map(|d| d as std::sync::Arc<dyn gobby_application::WebhookExecutor>),
        default_recall_limit: deps.default_recall_limit,
        importance_floor: deps.importance_floor,
        access_debounce_secs: deps.access_debounce_secs,
        memory_enabled: deps.memory_enabled,
    };

    match gobby_application::workflow::execute(&mut ctx, "generate_handoff", &json!({})).await {
        Some(value) if value.get("error").is_some() => {
            tracing::warn!(error = ?value["error"], "generate_handoff failed, failing open");
        }
        _ => {}
    }

    if let Err(e) = deps.workflow_repository.save(&ctx.state).await {
        tracing::warn!(error = %e, "failed to persist workflow state after pre_compact");
    }

    None
}
