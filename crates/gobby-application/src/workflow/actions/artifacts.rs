//! `capture_artifact`, `read_artifact`, `write_todos`, `mark_todo_complete`.

use gobby_domain::error::{Error, Result};
use serde_json::{json, Value};

use crate::workflow::action_context::ActionContext;

/// `capture_artifact` — glob-matches `pattern` and stores the first hit's
/// absolute path under `state.artifacts[as]`.
pub async fn capture_artifact(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let (Some(pattern), Some(as_key)) = (
        params.get("pattern").and_then(Value::as_str),
        params.get("as").and_then(Value::as_str),
    ) else {
        return Ok(Some(json!({ "error": "Missing required parameter: pattern or as" })));
    };

    let mut matched = None;
    for entry in glob::glob(pattern).map_err(|e| Error::invalid_argument(e.to_string()))? {
        let path = entry.map_err(|e| Error::io(e.to_string()))?;
        let absolute = path
            .canonicalize()
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        matched = Some(absolute);
        break;
    }

    let Some(path) = matched else {
        return Ok(Some(json!({ "error": format!("no file matched pattern: {pattern}") })));
    };

    let artifacts = ctx
        .state
        .artifacts
        .as_object_mut()
        .expect("artifacts is always a JSON object");
    artifacts.insert(as_key.to_owned(), Value::String(path.clone()));

    Ok(Some(json!({ "capture_artifact": path })))
}

/// `read_artifact` — reads the artifact previously captured under key
/// `pattern` and stores its file contents under `state.variables[as]`.
pub async fn read_artifact(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let (Some(key), Some(as_key)) = (
        params.get("pattern").and_then(Value::as_str),
        params.get("as").and_then(Value::as_str),
    ) else {
        return Ok(Some(json!({ "error": "Missing required parameter: pattern or as" })));
    };

    let Some(path) = ctx.state.artifacts.get(key).and_then(Value::as_str) else {
        return Ok(Some(json!({ "error": format!("no artifact captured under key: {key}") })));
    };
    let path = path.to_owned();

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| Error::io_with_source(format!("reading artifact {path}"), e))?;

    let variables = ctx
        .state
        .variables
        .as_object_mut()
        .expect("variables is always a JSON object");
    variables.insert(as_key.to_owned(), Value::String(contents));

    Ok(Some(json!({ "read_artifact": as_key })))
}

/// `write_todos` — overwrites `filename` with a Markdown checklist.
pub async fn write_todos(_ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let (Some(todos), Some(filename)) = (
        params.get("todos").and_then(Value::as_array),
        params.get("filename").and_then(Value::as_str),
    ) else {
        return Ok(Some(json!({ "error": "Missing required parameter: todos or filename" })));
    };

    let mut body = String::new();
    for todo in todos {
        let Some(text) = todo.as_str() else { continue };
        body.push_str("- [ ] ");
        body.push_str(text);
        body.push('\n');
    }

    tokio::fs::write(filename, body)
        .await
        .map_err(|e| Error::io_with_source(format!("writing todos file {filename}"), e))?;

    Ok(Some(json!({ "write_todos": filename })))
}

/// `mark_todo_complete` — toggles `[ ]` to `[x]` for the line matching
/// `todo_text` in `filename`.
pub async fn mark_todo_complete(_ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let (Some(todo_text), Some(filename)) = (
        params.get("todo_text").and_then(Value::as_str),
        params.get("filename").and_then(Value::as_str),
    ) else {
        return Ok(Some(json!({ "error": "Missing required parameter: todo_text or filename" })));
    };

    let contents = tokio::fs::read_to_string(filename)
        .await
        .map_err(|e| Error::io_with_source(format!("reading todos file {filename}"), e))?;

    let mut found = false;
    let updated: String = contents
        .lines()
        .map(|line| {
            if !found && line.contains(todo_text) && line.trim_start().starts_with("- [ ]") {
                found = true;
                line.replacen("- [ ]", "- [x]", 1)
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    if found {
        tokio::fs::write(filename, updated)
            .await
            .map_err(|e| Error::io_with_source(format!("writing todos file {filename}"), e))?;
    }

    Ok(Some(json!({ "mark_todo_complete": found })))
}
