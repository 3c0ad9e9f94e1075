//! Wire types for the hook pipeline: the shape the HTTP layer (out of scope
//! for this crate) marshals to and from JSON at the pipeline boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle moment a front-end CLI is reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEventType {
    /// A session started.
    SessionStart,
    /// A session ended.
    SessionEnd,
    /// The agent is about to act.
    BeforeAgent,
    /// The agent finished acting.
    AfterAgent,
    /// A tool is about to be invoked.
    BeforeTool,
    /// A tool finished executing.
    AfterTool,
    /// An informational notification from the front-end.
    Notification,
    /// The front-end is about to compact the transcript.
    PreCompact,
}

/// A lifecycle event reported by a front-end CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookEvent {
    /// Which lifecycle moment this is.
    pub event_type: HookEventType,
    /// The front-end's own session identifier (the external id).
    pub session_id: String,
    /// Which CLI produced this event, e.g. `"claude-code"`, `"resume"`, `"clear"`.
    pub source: String,
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
    /// Event-specific payload (`cwd`, `transcript_path`, tool name/args, ...).
    pub data: HashMap<String, Value>,
    /// Stable per-machine identifier, when supplied by the front-end.
    pub machine_id: Option<String>,
}

impl HookEvent {
    /// Reads a string field out of `data`.
    #[must_use]
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// Gate decision returned by the hook pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookDecision {
    /// Proceed normally.
    Allow,
    /// Deny the action outright.
    Block,
    /// Prompt the user/front-end for confirmation.
    Ask,
    /// Deny and do not retry.
    Deny,
}

impl Default for HookDecision {
    fn default() -> Self {
        Self::Allow
    }
}

/// Response returned by the hook pipeline for a single event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookResponse {
    /// The gate decision.
    pub decision: HookDecision,
    /// Why this decision was made, if notable.
    pub reason: Option<String>,
    /// Context to inject into the front-end's next prompt.
    pub context: Option<String>,
    /// A system message to surface directly to the user.
    pub system_message: Option<String>,
    /// Free-form metadata (e.g. resolved `external_id`, `task_id`).
    pub metadata: HashMap<String, Value>,
}

impl HookResponse {
    /// An `allow` response carrying only a reason.
    #[must_use]
    pub fn allow_with_reason(reason: impl Into<String>) -> Self {
        Self {
            decision: HookDecision::Allow,
            reason: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Appends `more` to this response's injected context, separated by a
    /// blank line if context already exists.
    pub fn merge_context(&mut self, more: &str) {
        match &mut self.context {
            Some(existing) => {
                existing.push_str("\n\n");
                existing.push_str(more);
            }
            None => self.context = Some(more.to_owned()),
        }
    }

    /// `true` for decisions that should short-circuit the pipeline.
    #[must_use]
    pub fn is_gating(&self) -> bool {
        matches!(
            self.decision,
            HookDecision::Block | HookDecision::Ask | HookDecision::Deny
        )
    }
}
