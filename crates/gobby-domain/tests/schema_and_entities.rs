use gobby_domain::schema::Schema;
use gobby_domain::test_utils::{
    create_test_mcp_server, create_test_memory, create_test_project, create_test_session,
    create_test_task, create_test_workflow_state,
};

#[test]
fn schema_definition_covers_every_canonical_table() {
    let schema = Schema::definition();
    let names: Vec<&str> = schema.tables.iter().map(|t| t.name.as_str()).collect();

    for expected in [
        "projects",
        "sessions",
        "tasks",
        "task_dependencies",
        "memories",
        "memory_crossrefs",
        "workflow_state",
        "mcp_servers",
        "mcp_tools",
        "mcp_tool_embeddings",
        "session_tasks",
        "session_memories",
        "task_validation_history",
        "task_selection_history",
        "worktrees",
    ] {
        assert!(names.contains(&expected), "missing table {expected}");
    }
}

#[test]
fn schema_has_no_fts_tables() {
    assert!(Schema::definition().fts.is_none());
}

#[test]
fn project_orphaned_sentinel_is_recognized() {
    assert!(gobby_domain::entities::Project::is_orphaned_id(
        "00000000-0000-0000-0000-000000000000"
    ));
    assert!(!gobby_domain::entities::Project::is_orphaned_id("proj-1"));
}

#[test]
fn test_builders_produce_internally_consistent_fixtures() {
    let project = create_test_project("proj-1");
    let session = create_test_session("sess-1", &project.id);
    let task = create_test_task("task-1", &project.id);
    let memory = create_test_memory("mem-1", Some(project.id.as_str()));
    let workflow = create_test_workflow_state(&session.id);
    let server = create_test_mcp_server("srv-1", &project.id);

    assert_eq!(session.project_id, project.id);
    assert_eq!(task.project_id, project.id);
    assert_eq!(memory.project_id.as_deref(), Some(project.id.as_str()));
    assert_eq!(workflow.session_id, session.id);
    assert_eq!(server.project_id, project.id);
    assert_eq!(workflow.version, 0);
}
