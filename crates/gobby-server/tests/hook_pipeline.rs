//! End-to-end tests for the hook pipeline, backed by a real in-memory
//! SQLite store so session/project resolution and the workflow-state
//! bookkeeping exercise the same code paths production does.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gobby_application::{MemoryRegistry, SessionRegistry, TaskRegistry};
use gobby_domain::error::Result;
use gobby_domain::ports::{DatabaseProvider, ToolProxy, WorkflowRepository};
use gobby_domain::value_objects::{HookDecision, HookEvent, HookEventType};
use gobby_infrastructure::HandlebarsTemplateEngine;
use gobby_providers::database::{
    SqliteDatabaseProvider, SqliteMemoryRepository, SqliteSessionRepository, SqliteTaskRepository,
    SqliteWorkflowRepository,
};
use gobby_server::hooks::{DaemonReadiness, HookPipeline, HookPipelineDeps, ProjectResolver, SessionIdCache};
use gobby_server::plugin::PluginHost;
use serde_json::{json, Value};

struct NoopToolProxy;

#[async_trait]
impl ToolProxy for NoopToolProxy {
    async fn call_tool(&self, _server: &str, _tool: &str, _args: Value, _timeout: Option<Duration>) -> Result<Value> {
        unimplemented!("not exercised by these tests")
    }
    async fn read_resource(&self, _server: &str, _uri: &str) -> Result<Value> {
        unimplemented!("not exercised by these tests")
    }
    async fn list_tools(&self, _server: &str) -> Result<Value> {
        unimplemented!("not exercised by these tests")
    }
}

async fn test_pipeline() -> HookPipeline {
    let executor = SqliteDatabaseProvider
        .connect_in_memory()
        .await
        .expect("in-memory database initializes");

    let workflow_repository: Arc<dyn WorkflowRepository> =
        Arc::new(SqliteWorkflowRepository::new(executor.clone()));

    let deps = HookPipelineDeps {
        readiness: Arc::new(DaemonReadiness::new()),
        session_cache: Arc::new(SessionIdCache::new()),
        session_registry: Arc::new(SessionRegistry::new(Arc::new(SqliteSessionRepository::new(executor.clone())))),
        task_registry: Arc::new(TaskRegistry::new(Arc::new(SqliteTaskRepository::new(executor.clone())))),
        memory_registry: Arc::new(MemoryRegistry::new(Arc::new(SqliteMemoryRepository::new(executor.clone())))),
        project_resolver: Arc::new(ProjectResolver::new(executor.clone())),
        workflow_repository,
        template_engine: Arc::new(HandlebarsTemplateEngine::new()),
        tool_proxy: Arc::new(NoopToolProxy),
        llm_service: None,
        transcript_processor: None,
        spawner: None,
        webhook_dispatcher: None,
        plugin_host: Arc::new(PluginHost::empty()),
        broadcaster: None,
        default_recall_limit: 5,
        importance_floor: 0.2,
        access_debounce_secs: 60,
        memory_enabled: true,
    };

    HookPipeline::new(deps)
}

fn session_start_event(external_id: &str, source_value: &str, cwd: &str) -> HookEvent {
    let mut data = std::collections::HashMap::new();
    data.insert("source".to_owned(), json!(source_value));
    data.insert("cwd".to_owned(), json!(cwd));
    HookEvent {
        event_type: HookEventType::SessionStart,
        session_id: external_id.to_owned(),
        source: "claude".to_owned(),
        timestamp: "2026-07-27T00:00:00Z".to_owned(),
        data,
        machine_id: Some("machine-1".to_owned()),
    }
}

#[tokio::test]
async fn first_session_start_registers_and_enhances() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = test_pipeline().await;

    let event = session_start_event("sess-ext-1", "startup", dir.path().to_str().unwrap());
    let response = pipeline.handle(event).await;

    assert_eq!(response.decision, HookDecision::Allow);
    assert!(response
        .system_message
        .as_deref()
        .unwrap()
        .contains("Session enhanced by gobby"));
    assert_eq!(
        response.metadata.get("external_id").and_then(Value::as_str),
        Some("sess-ext-1")
    );
}

#[tokio::test]
async fn repeated_session_start_resolves_to_the_same_session() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = test_pipeline().await;
    let cwd = dir.path().to_str().unwrap();

    let first = pipeline.handle(session_start_event("sess-ext-2", "startup", cwd)).await;
    let second = pipeline.handle(session_start_event("sess-ext-2", "startup", cwd)).await;

    assert_eq!(
        first.metadata.get("session_id"),
        second.metadata.get("session_id")
    );
}

#[tokio::test]
async fn resume_source_has_no_parent_lookup_message() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = test_pipeline().await;

    let event = session_start_event("sess-ext-3", "resume", dir.path().to_str().unwrap());
    let response = pipeline.handle(event).await;

    assert_eq!(response.decision, HookDecision::Allow);
    let message = response.system_message.unwrap();
    assert!(message.contains("Session enhanced by gobby"));
    assert!(!message.contains("Context restored"));
}
