//! `generate_summary`, `generate_handoff`, `synthesize_title`, `extract_handoff_context`.

use gobby_domain::entities::SessionStatus;
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::HandoffContext;
use serde_json::{json, Value};

use crate::workflow::action_context::ActionContext;

async fn summarize_transcript(ctx: &mut ActionContext, mode: &str) -> Result<String> {
    let session = ctx
        .session_registry
        .get(&ctx.session_id)
        .await?
        .ok_or_else(|| Error::not_found("session"))?;
    let processor = ctx
        .transcript_processor
        .as_ref()
        .ok_or_else(|| Error::internal("no transcript processor configured"))?;
    let llm = ctx
        .llm_service
        .as_ref()
        .ok_or_else(|| Error::internal("no LLM provider configured"))?;

    let jsonl_path = session.jsonl_path.clone().unwrap_or_default();
    let turns = processor.extract_turns(&jsonl_path).await?;
    let transcript = turns
        .iter()
        .map(|t| format!("{}: {}", t.role, t.content))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "Summarize this {mode} session transcript as concise Markdown:\n\n{transcript}"
    );
    let summary = llm.generate_text(&prompt).await?;
    ctx.session_registry
        .update_summary(&session.id, None, Some(&summary))
        .await?;
    Ok(summary)
}

/// `generate_summary` — `mode` must be `clear` or `compact`; any other
/// value is a contract violation, not a recoverable parameter error.
pub async fn generate_summary(ctx: &mut ActionContext, params: &Value) -> Result<Option<Value>> {
    let Some(mode) = params.get("mode").and_then(Value::as_str) else {
        return Ok(Some(json!({ "error": "Missing required parameter: mode" })));
    };
    if mode != "clear" && mode != "compact" {
        return Err(Error::invalid_argument(format!(
            "unknown generate_summary mode: {mode}"
        )));
    }
    let summary = summarize_transcript(ctx, mode).await?;
    Ok(Some(json!({ "generate_summary": summary })))
}

/// `generate_handoff` — derives `mode` from the triggering event type
/// instead of taking it as a parameter.
pub async fn generate_handoff(ctx: &mut ActionContext, _params: &Value) -> Result<Option<Value>> {
    let event_type = ctx
        .event_data
        .get("event_type")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let mode = if event_type == "pre_compact" || event_type == "compact" {
        "compact"
    } else {
        "clear"
    };
    let summary = summarize_transcript(ctx, mode).await?;
    ctx.session_registry
        .update_status(&ctx.session_id, SessionStatus::HandoffReady)
        .await?;
    Ok(Some(json!({ "generate_handoff": summary })))
}

/// `synthesize_title` — asks the LLM for a short title and updates the
/// session.
pub async fn synthesize_title(ctx: &mut ActionContext, _params: &Value) -> Result<Option<Value>> {
    let llm = ctx
        .llm_service
        .as_ref()
        .ok_or_else(|| Error::internal("no LLM provider configured"))?;
    let title = llm
        .generate_text("Generate a short, descriptive title (max 8 words) for this coding session.")
        .await?;
    let title = title.trim().trim_matches('"').to_owned();
    ctx.session_registry
        .update_title(&ctx.session_id, &title)
        .await?;
    Ok(Some(json!({ "synthesize_title": title })))
}

fn render_handoff_markdown(handoff: &HandoffContext) -> String {
    let mut out = String::new();
    if let Some(goal) = &handoff.initial_goal {
        out.push_str(&format!("**Goal:** {goal}\n\n"));
    }
    if let Some(task) = &handoff.active_task {
        out.push_str(&format!("**Active task:** {task}\n\n"));
    }
    if !handoff.recent_commits.is_empty() {
        out.push_str("**Recent commits:**\n");
        for commit in &handoff.recent_commits {
            out.push_str(&format!("- {commit}\n"));
        }
        out.push('\n');
    }
    if !handoff.modified_files.is_empty() {
        out.push_str("**Modified files:**\n");
        for file in &handoff.modified_files {
            out.push_str(&format!("- {file}\n"));
        }
        out.push('\n');
    }
    if let Some(activity) = &handoff.recent_activity {
        out.push_str(&format!("**Recent activity:** {activity}\n"));
    }
    out
}

/// `extract_handoff_context` — builds a compact handoff blob and stores it
/// as the session's `compact_markdown`.
pub async fn extract_handoff_context(
    ctx: &mut ActionContext,
    _params: &Value,
) -> Result<Option<Value>> {
    let processor = ctx
        .transcript_processor
        .as_ref()
        .ok_or_else(|| Error::internal("no transcript processor configured"))?;
    let session = ctx
        .session_registry
        .get(&ctx.session_id)
        .await?
        .ok_or_else(|| Error::not_found("session"))?;
    let jsonl_path = session.jsonl_path.clone().unwrap_or_default();
    let handoff = processor.extract_handoff_context(&jsonl_path).await?;
    let markdown = render_handoff_markdown(&handoff);
    ctx.session_registry
        .update_compact_markdown(&session.id, &markdown)
        .await?;
    Ok(Some(json!({ "extract_handoff_context": markdown })))
}
