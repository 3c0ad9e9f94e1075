//! `set_variable`, `increment_variable`, `save_workflow_state`,
//! `load_workflow_state`, `mark_session_status`.

use std::str::FromStr;

use gobby_domain::entities::SessionStatus;
use gobby_domain::error::Result;
use serde_json::{json, Value};

use crate::workflow::action_context::ActionContext;

/// `set_variable` — allocates `state.variables` as an object if it was
/// null, then sets `name`.
pub async fn set_variable(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return Ok(Some(json!({ "error": "Missing required parameter: name" })));
    };
    let Some(value) = params.get("value") else {
        return Ok(Some(json!({ "error": "Missing required parameter: value" })));
    };

    if !ctx.state.variables.is_object() {
        ctx.state.variables = Value::Object(serde_json::Map::new());
    }
    ctx.state
        .variables
        .as_object_mut()
        .expect("just ensured object")
        .insert(name.to_owned(), value.clone());

    Ok(Some(json!({ "set_variable": name })))
}

/// `increment_variable` — reads the current numeric value (default 0),
/// adds `amount` (default 1), and stores the result.
pub async fn increment_variable(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return Ok(Some(json!({ "error": "Missing required parameter: name" })));
    };
    let amount = params.get("amount").and_then(Value::as_f64).unwrap_or(1.0);

    if !ctx.state.variables.is_object() {
        ctx.state.variables = Value::Object(serde_json::Map::new());
    }
    let variables = ctx.state.variables.as_object_mut().expect("just ensured object");
    let current = variables.get(name).and_then(Value::as_f64).unwrap_or(0.0);
    let updated = current + amount;
    variables.insert(name.to_owned(), json!(updated));

    Ok(Some(json!({ "increment_variable": updated })))
}

/// `save_workflow_state` — persists the whole [`WorkflowState`].
pub async fn save_workflow_state(ctx: &mut ActionContext, _params: &Value) -> Result<Option<Value>> {
    let saved = ctx.workflow_repository.save(&ctx.state).await?;
    ctx.state = saved;
    Ok(Some(json!({ "save_workflow_state": ctx.state.version })))
}

/// `load_workflow_state` — restores [`WorkflowState`] from storage,
/// replacing the in-memory copy the action context was carrying.
pub async fn load_workflow_state(ctx: &mut ActionContext, _params: &Value) -> Result<Option<Value>> {
    let Some(loaded) = ctx.workflow_repository.get(&ctx.session_id).await? else {
        return Ok(Some(json!({ "error": "no workflow state for session" })));
    };
    ctx.state = loaded;
    Ok(Some(json!({ "load_workflow_state": ctx.state.version })))
}

/// `mark_session_status` — transitions the session's lifecycle status.
pub async fn mark_session_status(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let Some(status_str) = params.get("status").and_then(Value::as_str) else {
        return Ok(Some(json!({ "error": "Missing required parameter: status" })));
    };
    let Ok(status) = SessionStatus::from_str(status_str) else {
        return Ok(Some(json!({ "error": format!("unknown session status: {status_str}") })));
    };

    ctx.session_registry
        .update_status(&ctx.session_id, status)
        .await?;
    Ok(Some(json!({ "mark_session_status": status_str })))
}
