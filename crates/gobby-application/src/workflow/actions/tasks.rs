//! `persist_tasks`, `update_workflow_task`.

use gobby_domain::entities::{Task, TaskStatus};
use gobby_domain::error::{Error, Result};
use serde_json::{json, Value};

use crate::workflow::action_context::ActionContext;

/// `persist_tasks` — creates a batch of tasks produced by this workflow run.
pub async fn persist_tasks(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let (Some(tasks), Some(workflow_name)) = (
        params.get("tasks").and_then(Value::as_array),
        params.get("workflow_name").and_then(Value::as_str),
    ) else {
        return Ok(Some(
            json!({ "error": "Missing required parameter: tasks or workflow_name" }),
        ));
    };
    let parent_id = params.get("parent_id").and_then(Value::as_str);

    let session = ctx
        .session_registry
        .get(&ctx.session_id)
        .await?
        .ok_or_else(|| Error::not_found("session"))?;
    let now = chrono::Utc::now().to_rfc3339();

    let mut created_ids = Vec::with_capacity(tasks.len());
    for spec in tasks {
        let title = spec
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("untitled task")
            .to_owned();
        let task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: session.project_id.clone(),
            parent_task_id: parent_id.map(str::to_owned),
            created_in_session_id: Some(ctx.session_id.clone()),
            closed_in_session_id: None,
            closed_commit_sha: None,
            closed_at: None,
            title,
            description: spec.get("description").and_then(Value::as_str).map(str::to_owned),
            details: None,
            status: TaskStatus::Open,
            priority: spec.get("priority").and_then(Value::as_i64).unwrap_or(0) as i32,
            task_type: spec
                .get("task_type")
                .and_then(Value::as_str)
                .unwrap_or("task")
                .to_owned(),
            assignee: None,
            labels: Value::Array(Vec::new()),
            validation_status: None,
            validation_feedback: None,
            validation_criteria: None,
            validation_fail_count: 0,
            use_external_validator: false,
            complexity_score: None,
            estimated_subtasks: None,
            expansion_context: None,
            workflow_name: Some(workflow_name.to_owned()),
            verification: None,
            sequence_order: None,
            commits: None,
            seq_num: None,
            path_cache: String::new(),
            escalated_at: None,
            escalation_reason: None,
            github_issue_number: None,
            github_pr_number: None,
            linear_issue_id: None,
            created_at: now.clone(),
            updated_at: now.clone(),
        };
        let created = ctx.task_registry.create_task(&task).await?;
        created_ids.push(created.id);
    }

    Ok(Some(json!({ "persist_tasks": created_ids })))
}

/// `update_workflow_task` — applies only the fields that map to real task
/// columns; everything else in `params` is ignored silently.
pub async fn update_workflow_task(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let Some(task_id) = params.get("task_id").and_then(Value::as_str) else {
        return Ok(Some(json!({ "error": "Missing required parameter: task_id" })));
    };
    if params.get("project_id").and_then(Value::as_str).is_none() {
        return Ok(Some(json!({ "error": "Missing required parameter: project_id" })));
    }

    let mut fields = serde_json::Map::new();
    if let Some(status) = params.get("status").and_then(Value::as_str) {
        fields.insert("status".to_owned(), Value::String(status.to_owned()));
    }
    if let Some(outcome) = params.get("outcome") {
        fields.insert("verification".to_owned(), outcome.clone());
    }

    let updated = ctx.task_registry.update_task(task_id, Value::Object(fields)).await?;
    Ok(Some(json!({ "update_workflow_task": updated.is_some() })))
}
