#![allow(clippy::expect_used, missing_docs)]

use std::sync::Arc;

use gobby_domain::entities::{
    McpServerConfig, McpTool, McpTransport, Memory, MemoryType, SessionMemoryAction,
    SessionStatus, Task, TaskDependencyType, TaskStatus, WorkflowState,
};
use gobby_domain::ports::repositories::{RegisterSession, TaskFilters};
use gobby_domain::ports::{
    DatabaseExecutor, DatabaseProvider, McpServerRepository, MemoryRepository, SessionRepository,
    TaskRepository, WorkflowRepository,
};
use gobby_providers::database::{
    SqliteDatabaseProvider, SqliteMcpServerRepository, SqliteMemoryRepository,
    SqliteSessionRepository, SqliteTaskRepository, SqliteWorkflowRepository,
};

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

async fn executor() -> TestResult<Arc<dyn DatabaseExecutor>> {
    let provider = SqliteDatabaseProvider;
    Ok(provider.connect_in_memory().await?)
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[tokio::test]
async fn session_register_is_idempotent_on_composite_key() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteSessionRepository::new(executor);

    let fields = RegisterSession {
        external_id: "ext-1".to_owned(),
        machine_id: "machine-1".to_owned(),
        source: "claude-code".to_owned(),
        project_id: "proj-1".to_owned(),
        title: Some("first session".to_owned()),
        ..Default::default()
    };

    let first = repo.register(fields.clone()).await?;
    assert_eq!(first.seq_num, 1);
    assert_eq!(first.status, SessionStatus::Active);

    let second = repo
        .register(RegisterSession {
            title: Some("resumed session".to_owned()),
            ..fields
        })
        .await?;
    assert_eq!(second.id, first.id, "same composite key must resolve to the same row");
    assert_eq!(second.title.as_deref(), Some("resumed session"));

    Ok(())
}

#[tokio::test]
async fn session_lineage_lookup_returns_children() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteSessionRepository::new(executor);

    let parent = repo
        .register(RegisterSession {
            external_id: "ext-parent".to_owned(),
            machine_id: "m".to_owned(),
            source: "claude-code".to_owned(),
            project_id: "proj-1".to_owned(),
            ..Default::default()
        })
        .await?;

    let child = repo
        .register(RegisterSession {
            external_id: "ext-child".to_owned(),
            machine_id: "m".to_owned(),
            source: "claude-code".to_owned(),
            project_id: "proj-1".to_owned(),
            parent_session_id: Some(parent.id.clone()),
            ..Default::default()
        })
        .await?;

    let children = repo.find_children(&parent.id).await?;
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, child.id);

    Ok(())
}

#[tokio::test]
async fn session_resolve_reference_handles_seq_and_uuid() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteSessionRepository::new(executor);

    let session = repo
        .register(RegisterSession {
            external_id: "ext-1".to_owned(),
            machine_id: "m".to_owned(),
            source: "claude-code".to_owned(),
            project_id: "proj-1".to_owned(),
            ..Default::default()
        })
        .await?;

    let by_seq = repo
        .resolve_session_reference("#1", Some("proj-1"))
        .await?
        .expect("session #1 should resolve");
    assert_eq!(by_seq.id, session.id);

    let by_id = repo
        .resolve_session_reference(&session.id, None)
        .await?
        .expect("session id should resolve");
    assert_eq!(by_id.id, session.id);

    Ok(())
}

async fn make_task(project_id: &str, title: &str) -> Task {
    Task {
        id: uuid::Uuid::new_v4().to_string(),
        project_id: project_id.to_owned(),
        parent_task_id: None,
        created_in_session_id: None,
        closed_in_session_id: None,
        closed_commit_sha: None,
        closed_at: None,
        title: title.to_owned(),
        description: None,
        details: None,
        status: TaskStatus::Open,
        priority: 2,
        task_type: "feature".to_owned(),
        assignee: None,
        labels: serde_json::json!([]),
        validation_status: None,
        validation_feedback: None,
        validation_criteria: None,
        validation_fail_count: 0,
        use_external_validator: false,
        complexity_score: None,
        estimated_subtasks: None,
        expansion_context: None,
        workflow_name: None,
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
        created_at: now(),
        updated_at: now(),
    }
}

#[tokio::test]
async fn task_create_allocates_seq_num_and_path_cache() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteTaskRepository::new(executor);

    let root = repo.create_task(&make_task("proj-1", "root").await).await?;
    assert_eq!(root.seq_num, Some(1));
    assert!(root.path_cache.starts_with('/'));

    let mut child = make_task("proj-1", "child").await;
    child.parent_task_id = Some(root.id.clone());
    let child = repo.create_task(&child).await?;
    assert_eq!(child.seq_num, Some(2));
    assert!(child.path_cache.starts_with(&root.path_cache));

    Ok(())
}

#[tokio::test]
async fn task_update_recomputes_path_cache_when_reparented() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteTaskRepository::new(executor);

    let first_parent = repo.create_task(&make_task("proj-1", "parent-a").await).await?;
    let second_parent = repo.create_task(&make_task("proj-1", "parent-b").await).await?;
    let mut child = make_task("proj-1", "child").await;
    child.parent_task_id = Some(first_parent.id.clone());
    let child = repo.create_task(&child).await?;

    let updated = repo
        .update_task(&child.id, serde_json::json!({ "parent_task_id": second_parent.id }))
        .await?
        .expect("task still exists");
    assert!(updated.path_cache.starts_with(&second_parent.path_cache));

    Ok(())
}

#[tokio::test]
async fn task_dependency_and_listing_filters() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteTaskRepository::new(executor);

    let a = repo.create_task(&make_task("proj-1", "a").await).await?;
    let mut b = make_task("proj-1", "b").await;
    b.status = TaskStatus::InProgress;
    let b = repo.create_task(&b).await?;

    repo.add_dependency(&b.id, &a.id, TaskDependencyType::Blocks).await?;

    let in_progress = repo
        .list_tasks(
            "proj-1",
            TaskFilters {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].id, b.id);

    Ok(())
}

fn make_memory(project_id: Option<&str>, content: &str) -> Memory {
    Memory {
        id: uuid::Uuid::new_v4().to_string(),
        project_id: project_id.map(str::to_owned),
        memory_type: MemoryType::Fact,
        content: content.to_owned(),
        source_type: Some("manual".to_owned()),
        source_session_id: None,
        importance: 0.8,
        access_count: 0,
        last_accessed_at: None,
        embedding: None,
        tags: serde_json::json!([]),
        created_at: now(),
        updated_at: now(),
    }
}

#[tokio::test]
async fn memory_store_is_deduplicated_via_content_exists() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteMemoryRepository::new(executor);

    let memory = make_memory(Some("proj-1"), "always run cargo fmt before committing");
    assert!(!repo.content_exists(&memory.content, Some("proj-1")).await?);
    repo.store(&memory).await?;
    assert!(repo.content_exists(&memory.content, Some("proj-1")).await?);

    Ok(())
}

#[tokio::test]
async fn memory_recall_orders_by_importance_and_respects_floor() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteMemoryRepository::new(executor);

    let mut low = make_memory(Some("proj-1"), "low importance note");
    low.importance = 0.1;
    let mut high = make_memory(Some("proj-1"), "high importance note");
    high.importance = 0.9;
    repo.store(&low).await?;
    repo.store(&high).await?;

    let recalled = repo.recall("note", Some("proj-1"), 10, 0.5).await?;
    assert_eq!(recalled.len(), 1);
    assert_eq!(recalled[0].memory.id, high.id);

    Ok(())
}

#[tokio::test]
async fn memory_crossref_and_session_memory_roundtrip() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteMemoryRepository::new(executor.clone());
    let session_repo = SqliteSessionRepository::new(executor);

    let a = make_memory(Some("proj-1"), "memory a");
    let b = make_memory(Some("proj-1"), "memory b");
    repo.store(&a).await?;
    repo.store(&b).await?;
    repo.add_crossref(&a.id, &b.id, 0.75).await?;

    let session = session_repo
        .register(RegisterSession {
            external_id: "ext-1".to_owned(),
            machine_id: "m".to_owned(),
            source: "claude-code".to_owned(),
            project_id: "proj-1".to_owned(),
            ..Default::default()
        })
        .await?;
    repo.record_session_memory(&session.id, &a.id, SessionMemoryAction::Recalled)
        .await?;

    Ok(())
}

#[tokio::test]
async fn workflow_state_create_then_save_bumps_version() -> TestResult {
    let executor = executor().await?;
    let session_repo = SqliteSessionRepository::new(executor.clone());
    let workflow_repo = SqliteWorkflowRepository::new(executor);

    let session = session_repo
        .register(RegisterSession {
            external_id: "ext-1".to_owned(),
            machine_id: "m".to_owned(),
            source: "claude-code".to_owned(),
            project_id: "proj-1".to_owned(),
            ..Default::default()
        })
        .await?;

    let state = WorkflowState::new(&session.id, "default", &now());
    workflow_repo.create(&state).await?;

    let mut loaded = workflow_repo
        .get(&session.id)
        .await?
        .expect("workflow state exists");
    assert_eq!(loaded.version, 0);

    loaded.step = "implement".to_owned();
    let saved = workflow_repo.save(&loaded).await?;
    assert_eq!(saved.version, 1);
    assert_eq!(saved.step, "implement");

    Ok(())
}

#[tokio::test]
async fn mcp_server_tool_cache_replace_is_delete_then_insert() -> TestResult {
    let executor = executor().await?;
    let repo = SqliteMcpServerRepository::new(executor);

    let server = McpServerConfig {
        id: uuid::Uuid::new_v4().to_string(),
        name: "filesystem".to_owned(),
        project_id: "proj-1".to_owned(),
        transport: McpTransport::Stdio,
        url: None,
        command: Some("mcp-server-filesystem".to_owned()),
        args: None,
        env: None,
        headers: None,
        enabled: true,
        description: None,
        created_at: now(),
        updated_at: now(),
    };
    repo.insert_server(&server).await?;

    let tool = McpTool {
        id: uuid::Uuid::new_v4().to_string(),
        mcp_server_id: server.id.clone(),
        name: "read_file".to_owned(),
        description: Some("Reads a file".to_owned()),
        input_schema: None,
        created_at: now(),
        updated_at: now(),
    };
    repo.replace_tools(&server.id, std::slice::from_ref(&tool)).await?;
    assert_eq!(repo.list_tools(&server.id).await?.len(), 1);

    repo.replace_tools(&server.id, &[]).await?;
    assert!(repo.list_tools(&server.id).await?.is_empty());

    let servers = repo.list_servers("proj-1").await?;
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].name, "filesystem");

    Ok(())
}
