//! Hook Pipeline (C8): the critical path every front-end CLI event runs
//! through, in strict order. Fail-open throughout — only an explicit gate
//! (a blocking webhook, a plugin pre-handler, or the event-specific
//! handler) may produce a non-`allow` decision; every other error is
//! logged and the pipeline proceeds as if allowed.

use std::sync::Arc;

use gobby_application::{MemoryRegistry, SessionRegistry, TaskRegistry};
use gobby_domain::entities::Session;
use gobby_domain::error::Result;
use gobby_domain::ports::{
    LlmProvider, RegisterSession, Spawner, TemplateEngine, ToolProxy, TranscriptProcessor,
    WorkflowRepository,
};
use gobby_domain::value_objects::{HookDecision, HookEvent, HookResponse};
use serde_json::Value;

use crate::broadcast::Broadcaster;
use crate::plugin::PluginHost;
use crate::webhook::WebhookDispatcher;

use super::cache::SessionIdCache;
use super::handlers;
use super::project::ProjectResolver;
use super::readiness::DaemonReadiness;

/// Every capability the pipeline needs to run a single event end to end.
///
/// Optional fields reflect deployments with a subsystem disabled
/// (`webhook_dispatcher: None` when `hook_extensions.webhooks.enabled` is
/// `false`, `broadcaster: None` when no websocket subscriber config is
/// set), mirroring [`gobby_application::ActionContext`]'s own optional
/// capability fields.
pub struct HookPipelineDeps {
    pub readiness: Arc<DaemonReadiness>,
    pub session_cache: Arc<SessionIdCache>,
    pub session_registry: Arc<SessionRegistry>,
    pub task_registry: Arc<TaskRegistry>,
    pub memory_registry: Arc<MemoryRegistry>,
    pub project_resolver: Arc<ProjectResolver>,
    pub workflow_repository: Arc<dyn WorkflowRepository>,
    pub template_engine: Arc<dyn TemplateEngine>,
    pub tool_proxy: Arc<dyn ToolProxy>,
    pub llm_service: Option<Arc<dyn LlmProvider>>,
    pub transcript_processor: Option<Arc<dyn TranscriptProcessor>>,
    pub spawner: Option<Arc<dyn Spawner>>,
    pub webhook_dispatcher: Option<Arc<WebhookDispatcher>>,
    pub plugin_host: Arc<PluginHost>,
    pub broadcaster: Option<Arc<Broadcaster>>,
    pub default_recall_limit: usize,
    pub importance_floor: f64,
    pub access_debounce_secs: i64,
    pub memory_enabled: bool,
}

/// Coordinates session/project resolution, the workflow step, webhook
/// dispatch, plugin handlers, and broadcast for every reported hook event.
pub struct HookPipeline {
    deps: HookPipelineDeps,
}

impl HookPipeline {
    #[must_use]
    pub fn new(deps: HookPipelineDeps) -> Self {
        Self { deps }
    }

    /// Runs `event` through the full pipeline and returns the decision to
    /// report back to the front-end CLI.
    pub async fn handle(&self, mut event: HookEvent) -> HookResponse {
        if !self.deps.readiness.is_ready() {
            return HookResponse::allow_with_reason(format!(
                "daemon not ready: {}",
                self.deps.readiness.status()
            ));
        }

        let project = match event.data_str("cwd") {
            Some(cwd) => match self.deps.project_resolver.resolve(cwd).await {
                Ok(project) => Some(project),
                Err(e) => {
                    tracing::warn!(error = %e, "project resolution failed, continuing without a project");
                    None
                }
            },
            None => None,
        };

        let project_id = project.as_ref().map(|p| p.id.as_str());
        let session = match self.resolve_session(&event, project_id).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "session resolution failed, failing open");
                None
            }
        };

        if let Some(task_id) = event.data_str("task_id").map(str::to_owned) {
            event
                .data
                .entry("task_id".to_owned())
                .or_insert(Value::String(task_id));
        }

        let mut response = HookResponse::default();
        if let Some(session) = &session {
            response
                .metadata
                .insert("session_id".to_owned(), Value::String(session.id.clone()));
            response.metadata.insert(
                "external_id".to_owned(),
                Value::String(session.external_id.clone()),
            );

            if let Err(e) = self.ensure_workflow_state(&session.id).await {
                tracing::warn!(session_id = %session.id, error = %e, "workflow step failed, failing open");
            }
        }

        if let Some(dispatcher) = &self.deps.webhook_dispatcher {
            let results = dispatcher.dispatch_sync(&event, true).await;
            let (decision, reason) = WebhookDispatcher::get_blocking_decision(&results);
            if decision != HookDecision::Allow {
                return HookResponse {
                    decision,
                    reason,
                    ..HookResponse::default()
                };
            }
        }

        if let Some(plugin_response) = self.deps.plugin_host.run_plugin_handlers(&event, true, None).await {
            if plugin_response.is_gating() {
                return plugin_response;
            }
            merge_response(&mut response, plugin_response);
        }

        if let Some(dispatcher) = &self.deps.webhook_dispatcher {
            dispatcher.dispatch_async(event.clone());
        }

        if let Some(handler_response) =
            handlers::handle_event(&event, session.as_ref(), &self.deps).await
        {
            if handler_response.is_gating() {
                return handler_response;
            }
            merge_response(&mut response, handler_response);
        }

        if let Some(updated) = self
            .deps
            .plugin_host
            .run_plugin_handlers(&event, false, Some(&response))
            .await
        {
            response = updated;
        }

        if let Some(broadcaster) = &self.deps.broadcaster {
            broadcaster.broadcast_event(event.clone()).await;
        }

        response
    }

    async fn resolve_session(
        &self,
        event: &HookEvent,
        project_id: Option<&str>,
    ) -> Result<Option<Session>> {
        if let Some(internal_id) = self.deps.session_cache.get(&event.session_id).await {
            if let Some(session) = self.deps.session_registry.get(&internal_id).await? {
                return Ok(Some(session));
            }
        }

        let machine_id = event.machine_id.clone().unwrap_or_default();
        if let Some(session) = self
            .deps
            .session_registry
            .find_current(&event.session_id, &machine_id, &event.source)
            .await?
        {
            self.deps.session_cache.put(&event.session_id, &session.id).await;
            return Ok(Some(session));
        }

        let (Some(project_id), false) = (project_id, machine_id.is_empty()) else {
            return Ok(None);
        };

        let session = self
            .deps
            .session_registry
            .register(RegisterSession {
                external_id: event.session_id.clone(),
                machine_id,
                source: event.source.clone(),
                project_id: project_id.to_owned(),
                parent_session_id: None,
                title: None,
                model: None,
            })
            .await?;
        self.deps.session_cache.put(&event.session_id, &session.id).await;
        Ok(Some(session))
    }

    /// Makes sure a [`gobby_domain::entities::WorkflowState`] row exists
    /// for `session_id`. No declarative per-step rule set is evaluated
    /// here: the workflow step is a pass-through gate that never itself
    /// produces a gating decision, and session-lifecycle actions
    /// (handoff generation, summarization) run instead from the
    /// event-specific handler.
    async fn ensure_workflow_state(&self, session_id: &str) -> Result<()> {
        if self.deps.workflow_repository.get(session_id).await?.is_some() {
            return Ok(());
        }
        let now = chrono::Utc::now().to_rfc3339();
        let state = gobby_domain::entities::WorkflowState::new(session_id, "default", &now);
        self.deps.workflow_repository.create(&state).await
    }
}

/// Folds an event-specific or plugin response into the response accumulated
/// so far: context strings accumulate, the first non-empty system message
/// and reason win, and metadata keys merge (later handler wins on conflict).
fn merge_response(base: &mut HookResponse, incoming: HookResponse) {
    if let Some(context) = &incoming.context {
        base.merge_context(context);
    }
    if base.system_message.is_none() {
        base.system_message = incoming.system_message;
    }
    if base.reason.is_none() {
        base.reason = incoming.reason;
    }
    base.metadata.extend(incoming.metadata);
}
