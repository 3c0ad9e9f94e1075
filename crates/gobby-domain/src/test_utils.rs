//!
//! **Documentation**: [docs/modules/domain.md#testing-utilities](../../../docs/modules/domain.md#testing-utilities)
//!
//! Centralized test utilities for the entire workspace.
//! All crates MUST import shared test types from here instead of defining them locally.

/// Centralized test result type for all test functions across the workspace.
///
/// Use this instead of defining per-file `type TestResult` aliases.
///
/// # Example
/// ```rust,ignore
/// use gobby_domain::test_utils::TestResult;
///
/// #[test]
/// fn my_test() -> TestResult {
///     let value = some_fallible_fn()?;
///     assert_eq!(value, 42);
///     Ok(())
/// }
/// ```
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Centralized workspace root
// ---------------------------------------------------------------------------

/// Returns the workspace root directory by traversing up from the crate manifest dir.
///
/// Each crate sits at `<workspace>/crates/<crate>`, so 2 ancestors up is the workspace root.
/// Returns an error instead of panicking for composability with `TestResult`.
///
/// # Example
/// ```rust,ignore
/// use gobby_domain::test_utils::workspace_root;
///
/// let root = workspace_root()?;
/// assert!(root.join("Cargo.toml").exists());
/// ```
///
/// # Errors
///
/// Returns an error if `CARGO_MANIFEST_DIR` has fewer than 2 parent directories.
pub fn workspace_root() -> TestResult<std::path::PathBuf> {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .ok_or_else(|| {
            "workspace root not found (CARGO_MANIFEST_DIR has fewer than 2 parents)".into()
        })
        .map(std::path::Path::to_path_buf)
}

// ---------------------------------------------------------------------------
// Common test identity constants
// ---------------------------------------------------------------------------

/// Default test project ID.
pub const TEST_PROJECT_ID: &str = "test-project";

/// Default test session ID.
pub const TEST_SESSION_ID: &str = "test-session";

/// Default test machine ID.
pub const TEST_MACHINE_ID: &str = "test-machine";

/// Default test timestamp (`2023-11-14T22:13:20Z`).
pub const TEST_TIMESTAMP: &str = "2023-11-14T22:13:20Z";

use crate::entities::{
    McpServerConfig, McpTransport, Memory, MemoryType, Project, Session, SessionStatus,
    SessionUsage, Task, TaskStatus, WorkflowState,
};

/// Creates a test `Project` with default values.
#[must_use]
pub fn create_test_project(id: &str) -> Project {
    Project {
        id: id.to_owned(),
        name: TEST_PROJECT_ID.to_owned(),
        repo_path: "/tmp/test-project".to_owned(),
        github_repo: None,
        linear_team_id: None,
        created_at: TEST_TIMESTAMP.to_owned(),
        updated_at: TEST_TIMESTAMP.to_owned(),
    }
}

/// Creates a test `Session` with default values, upserted under `(external_id, machine_id, source)`.
#[must_use]
pub fn create_test_session(id: &str, project_id: &str) -> Session {
    Session {
        id: id.to_owned(),
        external_id: format!("ext-{id}"),
        machine_id: TEST_MACHINE_ID.to_owned(),
        source: "claude".to_owned(),
        project_id: project_id.to_owned(),
        seq_num: 1,
        title: None,
        status: SessionStatus::Active,
        jsonl_path: None,
        summary_path: None,
        summary_markdown: None,
        compact_markdown: None,
        git_branch: Some("main".to_owned()),
        parent_session_id: None,
        agent_depth: 0,
        spawned_by_agent_id: None,
        workflow_name: None,
        agent_run_id: None,
        context_injected: false,
        original_prompt: None,
        transcript_processed: false,
        terminal_context: None,
        usage: SessionUsage::default(),
        model: None,
        created_at: TEST_TIMESTAMP.to_owned(),
        updated_at: TEST_TIMESTAMP.to_owned(),
    }
}

/// Creates a test `Task` with default values.
#[must_use]
pub fn create_test_task(id: &str, project_id: &str) -> Task {
    Task {
        id: id.to_owned(),
        project_id: project_id.to_owned(),
        parent_task_id: None,
        created_in_session_id: None,
        closed_in_session_id: None,
        closed_commit_sha: None,
        closed_at: None,
        title: format!("Task {id}"),
        description: Some("Test task description".to_owned()),
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
        seq_num: Some(1),
        path_cache: format!("/{id}"),
        escalated_at: None,
        escalation_reason: None,
        github_issue_number: None,
        github_pr_number: None,
        linear_issue_id: None,
        created_at: TEST_TIMESTAMP.to_owned(),
        updated_at: TEST_TIMESTAMP.to_owned(),
    }
}

/// Creates a test `Memory` with default values.
#[must_use]
pub fn create_test_memory(id: &str, project_id: Option<&str>) -> Memory {
    Memory {
        id: id.to_owned(),
        project_id: project_id.map(str::to_owned),
        memory_type: MemoryType::Fact,
        content: "The test suite prefers real fixtures over mocks.".to_owned(),
        source_type: Some("manual".to_owned()),
        source_session_id: None,
        importance: 0.5,
        access_count: 0,
        last_accessed_at: None,
        embedding: None,
        tags: serde_json::json!([]),
        created_at: TEST_TIMESTAMP.to_owned(),
        updated_at: TEST_TIMESTAMP.to_owned(),
    }
}

/// Creates a fresh test `WorkflowState` for `session_id`.
#[must_use]
pub fn create_test_workflow_state(session_id: &str) -> WorkflowState {
    WorkflowState::new(session_id, "default", TEST_TIMESTAMP)
}

/// Creates a test `McpServerConfig` with default (stdio) transport values.
#[must_use]
pub fn create_test_mcp_server(id: &str, project_id: &str) -> McpServerConfig {
    McpServerConfig {
        id: id.to_owned(),
        name: format!("server-{id}"),
        project_id: project_id.to_owned(),
        transport: McpTransport::Stdio,
        url: None,
        command: Some("echo".to_owned()),
        args: None,
        env: None,
        headers: None,
        enabled: true,
        description: None,
        created_at: TEST_TIMESTAMP.to_owned(),
        updated_at: TEST_TIMESTAMP.to_owned(),
    }
}
