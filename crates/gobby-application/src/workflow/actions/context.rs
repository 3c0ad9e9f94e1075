//! `inject_context`, `inject_message`, `switch_mode`.

use gobby_domain::error::{Error, Result};
use serde_json::{json, Value};

use crate::workflow::action_context::ActionContext;

/// `inject_context` — produces a string to inject into the front-end's next
/// prompt, drawn from one of five sources.
pub async fn inject_context(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let Some(source) = params.get("source").and_then(Value::as_str) else {
        return Ok(None);
    };

    let text = match source {
        "previous_session_summary" => ctx
            .session_registry
            .get(&ctx.session_id)
            .await?
            .and_then(|s| s.summary_markdown)
            .unwrap_or_default(),
        "compact_handoff" => ctx
            .session_registry
            .get(&ctx.session_id)
            .await?
            .and_then(|s| s.compact_markdown)
            .unwrap_or_default(),
        "artifacts" => serde_json::to_string_pretty(&ctx.state.artifacts).unwrap_or_default(),
        "observations" => serde_json::to_string_pretty(&ctx.state.observations).unwrap_or_default(),
        "workflow_state" => {
            json!({
                "step": ctx.state.step,
                "variables": ctx.state.variables,
                "artifacts": ctx.state.artifacts,
            })
            .to_string()
        }
        other => {
            return Err(Error::invalid_argument(format!(
                "unknown inject_context source: {other}"
            )));
        }
    };

    ctx.state.context_injected = true;
    Ok(Some(json!({ "inject_context": text })))
}

/// `inject_message` — renders `content` through the template engine.
pub async fn inject_message(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let Some(content) = params.get("content").and_then(Value::as_str) else {
        return Ok(Some(json!({ "error": "Missing required parameter: content" })));
    };
    Ok(Some(json!({ "inject_message": ctx.render(content) })))
}

/// `switch_mode` — returns a synthetic `inject_context` announcing the mode
/// switch; the receiving front-end is expected to honor it.
pub async fn switch_mode(_ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let Some(mode) = params.get("mode").and_then(Value::as_str) else {
        return Ok(Some(json!({ "error": "Missing required parameter: mode" })));
    };
    Ok(Some(json!({
        "inject_context": format!("SYSTEM: SWITCH MODE TO {}", mode.to_uppercase())
    })))
}
