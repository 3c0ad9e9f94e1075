//! `memory_save`, `memory_recall_relevant`, `memory_sync_import`, `memory_sync_export`.

use gobby_domain::entities::{Memory, MemoryType};
use gobby_domain::error::Result;
use serde_json::{json, Value};

use crate::registries::RememberOutcome;
use crate::workflow::action_context::ActionContext;

/// `memory_save` — idempotent save; every failure mode produces a result
/// rather than propagating, so the workflow keeps running either way.
pub async fn memory_save(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    if !ctx.memory_enabled {
        return Ok(Some(json!({ "saved": false, "reason": "disabled" })));
    }
    let Some(content) = params.get("content").and_then(Value::as_str) else {
        return Ok(Some(json!({ "saved": false, "reason": "missing content" })));
    };

    let project_id = params
        .get("project_id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .or_else(|| {
            ctx.event_data
                .get("project_id")
                .and_then(Value::as_str)
                .map(str::to_owned)
        });
    let Some(project_id) = project_id else {
        return Ok(Some(json!({ "saved": false, "reason": "no project" })));
    };

    let now = chrono::Utc::now().to_rfc3339();
    let memory = Memory {
        id: uuid::Uuid::new_v4().to_string(),
        project_id: Some(project_id),
        memory_type: MemoryType::Fact,
        content: content.to_owned(),
        source_type: Some("workflow".to_owned()),
        source_session_id: Some(ctx.session_id.clone()),
        importance: 0.5,
        access_count: 0,
        last_accessed_at: None,
        embedding: None,
        tags: Value::Array(Vec::new()),
        created_at: now.clone(),
        updated_at: now,
    };

    match ctx.memory_registry.remember(memory).await {
        Ok(RememberOutcome::Saved(stored)) => {
            Ok(Some(json!({ "saved": true, "memory_id": stored.id })))
        }
        Ok(RememberOutcome::Duplicate) => Ok(Some(json!({ "saved": false, "reason": "duplicate" }))),
        Err(e) => Ok(Some(json!({ "saved": false, "reason": e.to_string() }))),
    }
}

/// `memory_recall_relevant` — recalls memories relevant to the event's
/// prompt and injects the top matches as context.
pub async fn memory_recall_relevant(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let prompt = ctx
        .event_data
        .get("prompt")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if prompt.is_empty() {
        return Ok(None);
    }

    let project_id = ctx.event_data.get("project_id").and_then(Value::as_str);
    let limit = params
        .get("limit")
        .and_then(Value::as_u64)
        .map(|n| n as usize)
        .unwrap_or(ctx.default_recall_limit);

    let ranked = ctx
        .memory_registry
        .recall(
            prompt,
            project_id,
            limit,
            ctx.importance_floor,
            ctx.access_debounce_secs,
        )
        .await?;
    if ranked.is_empty() {
        return Ok(None);
    }

    let text = ranked
        .iter()
        .map(|r| format!("- {}", r.memory.content))
        .collect::<Vec<_>>()
        .join("\n");
    ctx.state.context_injected = true;
    Ok(Some(json!({ "inject_context": text })))
}

/// `memory_sync_import` — delegates to the memory-sync manager when one is
/// configured. No deployment wires one up yet, so this is a no-op.
pub async fn memory_sync_import(_ctx: &mut ActionContext, _params: &Value) -> Result<Option<Value>> {
    Ok(None)
}

/// `memory_sync_export` — see [`memory_sync_import`].
pub async fn memory_sync_export(_ctx: &mut ActionContext, _params: &Value) -> Result<Option<Value>> {
    Ok(None)
}
