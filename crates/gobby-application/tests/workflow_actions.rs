//! Exercises workflow action handlers that don't require a live registry
//! backend: state mutation, template-free context actions, and the
//! parameter-validation paths of actions that do.

use std::sync::Arc;

use async_trait::async_trait;
use gobby_application::registries::{MemoryRegistry, SessionRegistry, TaskRegistry};
use gobby_application::workflow::{execute, ActionContext};
use gobby_domain::entities::{
    Memory, Session, SessionMemoryAction, SessionStatus, Task, TaskDependency, TaskDependencyType,
    WorkflowState,
};
use gobby_domain::error::Result;
use gobby_domain::ports::{
    LlmProvider, MemoryRepository, RankedMemory, RegisterSession, SessionRepository, TaskFilters,
    TaskRepository, TerminalPickupMetadata, ToolProxy, WorkflowRepository,
};
use serde_json::{json, Value};

struct UnusedSessionRepository;
#[async_trait]
impl SessionRepository for UnusedSessionRepository {
    async fn register(&self, _fields: RegisterSession) -> Result<Session> {
        unimplemented!("not exercised by these tests")
    }
    async fn get(&self, _id: &str) -> Result<Option<Session>> {
        unimplemented!("not exercised by these tests")
    }
    async fn find_by_external_id(
        &self,
        _external_id: &str,
        _machine_id: &str,
        _project_id: &str,
        _source: &str,
    ) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn find_current(
        &self,
        _external_id: &str,
        _machine_id: &str,
        _source: &str,
    ) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn find_parent(
        &self,
        _machine_id: &str,
        _project_id: &str,
        _status: SessionStatus,
        _source: Option<&str>,
    ) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn find_children(&self, _parent_id: &str) -> Result<Vec<Session>> {
        unimplemented!()
    }
    async fn update_status(&self, _id: &str, _status: SessionStatus) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn update_title(&self, _id: &str, _title: &str) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn update_model(&self, _id: &str, _model: &str) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn update_summary(
        &self,
        _id: &str,
        _summary_path: Option<&str>,
        _summary_markdown: Option<&str>,
    ) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn update_compact_markdown(
        &self,
        _id: &str,
        _compact_markdown: &str,
    ) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn update_parent_session_id(
        &self,
        _id: &str,
        _parent_session_id: &str,
    ) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn update_terminal_pickup_metadata(
        &self,
        _id: &str,
        _metadata: TerminalPickupMetadata,
    ) -> Result<Option<Session>> {
        unimplemented!()
    }
    async fn pause_inactive_active_sessions(&self, _timeout_minutes: i64) -> Result<u64> {
        unimplemented!()
    }
    async fn expire_stale_sessions(&self, _timeout_hours: i64) -> Result<u64> {
        unimplemented!()
    }
    async fn get_pending_transcript_sessions(&self, _limit: usize) -> Result<Vec<Session>> {
        unimplemented!()
    }
    async fn resolve_session_reference(
        &self,
        _reference: &str,
        _project_id: Option<&str>,
    ) -> Result<Option<Session>> {
        unimplemented!()
    }
}

struct UnusedTaskRepository;
#[async_trait]
impl TaskRepository for UnusedTaskRepository {
    async fn create_task(&self, _task: &Task) -> Result<Task> {
        unimplemented!()
    }
    async fn update_task(&self, _id: &str, _fields: Value) -> Result<Option<Task>> {
        unimplemented!()
    }
    async fn delete_task(&self, _id: &str) -> Result<()> {
        unimplemented!()
    }
    async fn get_task(&self, _id: &str) -> Result<Option<Task>> {
        unimplemented!()
    }
    async fn list_tasks(&self, _project_id: &str, _filters: TaskFilters) -> Result<Vec<Task>> {
        unimplemented!()
    }
    async fn add_dependency(
        &self,
        _task_id: &str,
        _depends_on: &str,
        _dep_type: TaskDependencyType,
    ) -> Result<TaskDependency> {
        unimplemented!()
    }
    async fn update_path_cache(&self, _id: &str) -> Result<()> {
        unimplemented!()
    }
}

struct UnusedMemoryRepository;
#[async_trait]
impl MemoryRepository for UnusedMemoryRepository {
    async fn content_exists(&self, _content: &str, _project_id: Option<&str>) -> Result<bool> {
        unimplemented!()
    }
    async fn store(&self, _memory: &Memory) -> Result<Memory> {
        unimplemented!()
    }
    async fn get(&self, _id: &str) -> Result<Option<Memory>> {
        unimplemented!()
    }
    async fn recall(
        &self,
        _query: &str,
        _project_id: Option<&str>,
        _limit: usize,
        _importance_floor: f64,
    ) -> Result<Vec<RankedMemory>> {
        unimplemented!()
    }
    async fn record_access(&self, _id: &str, _debounce_secs: i64) -> Result<()> {
        unimplemented!()
    }
    async fn decay_importance(&self, _monthly_rate: f64, _floor: f64) -> Result<u64> {
        unimplemented!()
    }
    async fn add_crossref(&self, _source_id: &str, _target_id: &str, _similarity: f64) -> Result<()> {
        unimplemented!()
    }
    async fn record_session_memory(
        &self,
        _session_id: &str,
        _memory_id: &str,
        _action: SessionMemoryAction,
    ) -> Result<()> {
        unimplemented!()
    }
}

struct UnusedWorkflowRepository;
#[async_trait]
impl WorkflowRepository for UnusedWorkflowRepository {
    async fn get(&self, _session_id: &str) -> Result<Option<WorkflowState>> {
        unimplemented!()
    }
    async fn create(&self, _state: &WorkflowState) -> Result<()> {
        unimplemented!()
    }
    async fn save(&self, _state: &WorkflowState) -> Result<WorkflowState> {
        unimplemented!()
    }
    async fn delete(&self, _session_id: &str) -> Result<()> {
        unimplemented!()
    }
}

struct PassthroughTemplateEngine;
impl gobby_domain::ports::TemplateEngine for PassthroughTemplateEngine {
    fn render(&self, template: &str, _context: &Value) -> String {
        template.to_owned()
    }
}

struct UnusedToolProxy;
#[async_trait]
impl ToolProxy for UnusedToolProxy {
    async fn call_tool(
        &self,
        _server_name: &str,
        _tool_name: &str,
        _arguments: Value,
        _timeout: Option<std::time::Duration>,
    ) -> Result<Value> {
        unimplemented!()
    }
    async fn read_resource(&self, _server_name: &str, _uri: &str) -> Result<Value> {
        unimplemented!()
    }
    async fn list_tools(&self, _server_name: &str) -> Result<Value> {
        unimplemented!()
    }
}

fn test_context() -> ActionContext {
    ActionContext {
        session_id: "sess-1".to_owned(),
        state: WorkflowState::new("sess-1", "default", "2026-07-27T00:00:00Z"),
        event_data: json!({}),
        session_registry: Arc::new(SessionRegistry::new(Arc::new(UnusedSessionRepository))),
        task_registry: Arc::new(TaskRegistry::new(Arc::new(UnusedTaskRepository))),
        memory_registry: Arc::new(MemoryRegistry::new(Arc::new(UnusedMemoryRepository))),
        workflow_repository: Arc::new(UnusedWorkflowRepository),
        template_engine: Arc::new(PassthroughTemplateEngine),
        tool_proxy: Arc::new(UnusedToolProxy),
        llm_service: None::<Arc<dyn LlmProvider>>,
        transcript_processor: None,
        spawner: None,
        webhook_executor: None,
        default_recall_limit: 5,
        importance_floor: 0.2,
        access_debounce_secs: 60,
        memory_enabled: true,
    }
}

#[tokio::test]
async fn set_variable_allocates_object_when_null() {
    let mut ctx = test_context();
    assert!(ctx.state.variables.is_object());

    let result = execute(&mut ctx, "set_variable", &json!({"name": "foo", "value": 42}))
        .await
        .expect("set_variable always returns a value");

    assert_eq!(result["set_variable"], "foo");
    assert_eq!(ctx.state.variables["foo"], 42);
}

#[tokio::test]
async fn increment_variable_defaults_to_zero_and_adds_one() {
    let mut ctx = test_context();

    execute(&mut ctx, "increment_variable", &json!({"name": "counter"}))
        .await
        .unwrap();
    assert_eq!(ctx.state.variables["counter"], 1.0);

    execute(
        &mut ctx,
        "increment_variable",
        &json!({"name": "counter", "amount": 3}),
    )
    .await
    .unwrap();
    assert_eq!(ctx.state.variables["counter"], 4.0);
}

#[tokio::test]
async fn switch_mode_returns_synthetic_context() {
    let mut ctx = test_context();
    let result = execute(&mut ctx, "switch_mode", &json!({"mode": "plan"}))
        .await
        .unwrap();
    assert_eq!(result["inject_context"], "SYSTEM: SWITCH MODE TO PLAN");
}

#[tokio::test]
async fn inject_context_without_source_returns_none() {
    let mut ctx = test_context();
    let result = execute(&mut ctx, "inject_context", &json!({})).await;
    assert!(result.is_none());
    assert!(!ctx.state.context_injected);
}

#[tokio::test]
async fn unknown_action_returns_none() {
    let mut ctx = test_context();
    let result = execute(&mut ctx, "does_not_exist", &json!({})).await;
    assert!(result.is_none());
}

#[tokio::test]
async fn call_mcp_tool_missing_names_reports_error() {
    let mut ctx = test_context();
    let result = execute(&mut ctx, "call_mcp_tool", &json!({"server_name": "foo"}))
        .await
        .unwrap();
    assert_eq!(result["error"], "Missing server_name or tool_name");
}

#[tokio::test]
async fn memory_save_reports_disabled_without_touching_repository() {
    let mut ctx = test_context();
    ctx.memory_enabled = false;
    let result = execute(&mut ctx, "memory_save", &json!({"content": "x"}))
        .await
        .unwrap();
    assert_eq!(result["saved"], false);
    assert_eq!(result["reason"], "disabled");
}

#[tokio::test]
async fn memory_save_reports_missing_content() {
    let mut ctx = test_context();
    let result = execute(&mut ctx, "memory_save", &json!({})).await.unwrap();
    assert_eq!(result["saved"], false);
    assert_eq!(result["reason"], "missing content");
}

#[tokio::test]
async fn webhook_missing_target_reports_error() {
    let mut ctx = test_context();
    let result = execute(&mut ctx, "webhook", &json!({"method": "POST"}))
        .await
        .unwrap();
    assert_eq!(result["error"], "Missing required parameter: url or webhook_id");
}

#[tokio::test]
async fn capture_and_read_artifact_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("note.txt");
    tokio::fs::write(&file_path, "hello artifact").await.unwrap();
    let pattern = file_path.to_string_lossy().into_owned();

    let mut ctx = test_context();
    execute(
        &mut ctx,
        "capture_artifact",
        &json!({"pattern": pattern, "as": "note"}),
    )
    .await
    .unwrap();
    assert!(ctx.state.artifacts["note"].as_str().unwrap().ends_with("note.txt"));

    execute(
        &mut ctx,
        "read_artifact",
        &json!({"pattern": "note", "as": "note_contents"}),
    )
    .await
    .unwrap();
    assert_eq!(ctx.state.variables["note_contents"], "hello artifact");
}

#[tokio::test]
async fn write_and_mark_todo_complete() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("todos.md");
    let filename = file_path.to_string_lossy().into_owned();

    let mut ctx = test_context();
    execute(
        &mut ctx,
        "write_todos",
        &json!({"todos": ["write tests", "ship it"], "filename": filename}),
    )
    .await
    .unwrap();

    let result = execute(
        &mut ctx,
        "mark_todo_complete",
        &json!({"todo_text": "write tests", "filename": filename}),
    )
    .await
    .unwrap();
    assert_eq!(result["mark_todo_complete"], true);

    let contents = tokio::fs::read_to_string(&file_path).await.unwrap();
    assert!(contents.contains("- [x] write tests"));
    assert!(contents.contains("- [ ] ship it"));
}
