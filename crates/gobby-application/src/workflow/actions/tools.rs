//! `call_mcp_tool`, `call_llm`, `start_new_session`, `webhook`.

use gobby_domain::error::{Error, Result};
use serde_json::{json, Value};

use crate::workflow::action_context::ActionContext;
use crate::workflow::webhook_executor::WebhookTarget;

/// `call_mcp_tool` — routes through the tool proxy; captures the result
/// under `state.variables[as]` if `as` is given.
pub async fn call_mcp_tool(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let (Some(server_name), Some(tool_name)) = (
        params.get("server_name").and_then(Value::as_str),
        params.get("tool_name").and_then(Value::as_str),
    ) else {
        return Ok(Some(json!({ "error": "Missing server_name or tool_name" })));
    };
    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

    let result = ctx
        .tool_proxy
        .call_tool(server_name, tool_name, arguments, None)
        .await?;

    if let Some(as_key) = params.get("as").and_then(Value::as_str) {
        if !ctx.state.variables.is_object() {
            ctx.state.variables = Value::Object(serde_json::Map::new());
        }
        ctx.state
            .variables
            .as_object_mut()
            .expect("just ensured object")
            .insert(as_key.to_owned(), result.clone());
    }

    Ok(Some(json!({ "call_mcp_tool": result })))
}

/// `call_llm` — renders `prompt` through the template engine, calls the
/// default provider, and stores the result under `state.variables[output_as]`.
pub async fn call_llm(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let (Some(prompt), Some(output_as)) = (
        params.get("prompt").and_then(Value::as_str),
        params.get("output_as").and_then(Value::as_str),
    ) else {
        return Ok(Some(
            json!({ "error": "Missing required parameter: prompt or output_as" }),
        ));
    };

    let llm = ctx
        .llm_service
        .as_ref()
        .ok_or_else(|| Error::internal("no LLM provider configured"))?;
    let rendered = ctx.render(prompt);
    let text = llm.generate_text(&rendered).await?;

    if !ctx.state.variables.is_object() {
        ctx.state.variables = Value::Object(serde_json::Map::new());
    }
    ctx.state
        .variables
        .as_object_mut()
        .expect("just ensured object")
        .insert(output_as.to_owned(), Value::String(text.clone()));

    Ok(Some(json!({ "call_llm": text })))
}

/// `start_new_session` — spawns a new front-end CLI process with `prompt`.
pub async fn start_new_session(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let (Some(command), Some(prompt)) = (
        params.get("command").and_then(Value::as_str),
        params.get("prompt").and_then(Value::as_str),
    ) else {
        return Ok(Some(
            json!({ "error": "Missing required parameter: command or prompt" }),
        ));
    };
    let args: Vec<String> = params
        .get("args")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_owned)).collect())
        .unwrap_or_default();

    let spawner = ctx
        .spawner
        .as_ref()
        .ok_or_else(|| Error::internal("no spawner configured"))?;
    let spawned = spawner.spawn(command, &args, prompt).await?;

    Ok(Some(json!({ "started_new_session": true, "pid": spawned.pid })))
}

/// `webhook` — fires a single outbound call via the webhook executor,
/// optionally capturing pieces of the response into workflow variables.
pub async fn webhook(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let target = match (
        params.get("url").and_then(Value::as_str),
        params.get("webhook_id").and_then(Value::as_str),
    ) {
        (Some(url), _) => WebhookTarget::Url(url.to_owned()),
        (None, Some(id)) => WebhookTarget::EndpointId(id.to_owned()),
        (None, None) => {
            return Ok(Some(json!({ "error": "Missing required parameter: url or webhook_id" })));
        }
    };
    let Some(method) = params.get("method").and_then(Value::as_str) else {
        return Ok(Some(json!({ "error": "Missing required parameter: method" })));
    };
    let payload = params.get("payload").cloned();
    let retry = params.get("retry").and_then(Value::as_u64).map(|n| n as u32);

    let executor = ctx
        .webhook_executor
        .as_ref()
        .ok_or_else(|| Error::internal("no webhook executor configured"))?;
    let response = executor.execute(target, method, payload, retry).await?;

    if let Some(capture) = params.get("capture_response") {
        if !ctx.state.variables.is_object() {
            ctx.state.variables = Value::Object(serde_json::Map::new());
        }
        let variables = ctx.state.variables.as_object_mut().expect("just ensured object");
        if let Some(status_var) = capture.get("status_var").and_then(Value::as_str) {
            variables.insert(status_var.to_owned(), json!(response.status));
        }
        if let Some(body_var) = capture.get("body_var").and_then(Value::as_str) {
            variables.insert(body_var.to_owned(), response.body.clone());
        }
        if let Some(headers_var) = capture.get("headers_var").and_then(Value::as_str) {
            variables.insert(headers_var.to_owned(), response.headers.clone());
        }
    }

    Ok(Some(json!({ "webhook": { "status": response.status } })))
}
