//! Shared state threaded through every workflow action handler.

use std::sync::Arc;

use gobby_domain::entities::WorkflowState;
use gobby_domain::ports::{
    LlmProvider, Spawner, TemplateEngine, ToolProxy, TranscriptProcessor, WorkflowRepository,
};
use serde_json::Value;

use crate::registries::{MemoryRegistry, SessionRegistry, TaskRegistry};
use crate::workflow::webhook_executor::WebhookExecutor;

/// Everything an action handler needs: the session's workflow state, the
/// registries it may read or write, and the optional capabilities (LLM,
/// transcript parsing, process spawning) that not every deployment enables.
pub struct ActionContext {
    /// Session this action run is executing for.
    pub session_id: String,
    /// Mutable workflow state; handlers mutate fields directly and the
    /// caller persists via [`WorkflowRepository::save`] once the step completes.
    pub state: WorkflowState,
    /// The event payload that triggered this workflow step.
    pub event_data: Value,

    /// Session lifecycle registry.
    pub session_registry: Arc<SessionRegistry>,
    /// Task tracking registry.
    pub task_registry: Arc<TaskRegistry>,
    /// Memory/skill registry.
    pub memory_registry: Arc<MemoryRegistry>,
    /// Workflow state persistence port.
    pub workflow_repository: Arc<dyn WorkflowRepository>,

    /// Template engine used to render string parameters.
    pub template_engine: Arc<dyn TemplateEngine>,
    /// Tool-call proxy for `call_mcp_tool`.
    pub tool_proxy: Arc<dyn ToolProxy>,

    /// Default LLM provider, if configured.
    pub llm_service: Option<Arc<dyn LlmProvider>>,
    /// Transcript processor, if configured.
    pub transcript_processor: Option<Arc<dyn TranscriptProcessor>>,
    /// Sub-agent process spawner, if configured.
    pub spawner: Option<Arc<dyn Spawner>>,
    /// Webhook call executor, if configured.
    pub webhook_executor: Option<Arc<dyn WebhookExecutor>>,

    /// Default recall result count for `memory_recall_relevant`.
    pub default_recall_limit: usize,
    /// Importance floor applied to recall.
    pub importance_floor: f64,
    /// Access debounce window, seconds.
    pub access_debounce_secs: i64,
    /// Whether the memory subsystem is enabled for this deployment.
    pub memory_enabled: bool,
}

impl ActionContext {
    /// Renders `template` through the configured [`TemplateEngine`] against
    /// `state.variables`, `state.artifacts`, and the current event payload.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        let context = serde_json::json!({
            "variables": self.state.variables,
            "artifacts": self.state.artifacts,
            "event": self.event_data,
        });
        self.template_engine.render(template, &context)
    }
}
