//! Gobby daemon entrypoint.
//!
//! Loads configuration, connects the embedded store, and wires the hook
//! pipeline and its extension points (webhooks, plugins, broadcast). The
//! HTTP surface that actually receives front-end CLI events, and the
//! install/config subcommands around it, are a separate concern this
//! binary does not implement — this entrypoint's job ends at constructing
//! a ready [`HookPipeline`] and keeping the process alive until asked to
//! stop.

use std::sync::Arc;
use std::time::Duration;

use gobby_application::{MemoryRegistry, SessionRegistry, TaskRegistry};
use gobby_domain::ports::DatabaseProvider as _;
use gobby_domain::registry::database::resolve_database_provider;
use gobby_domain::value_objects::DaemonConfig;
use gobby_infrastructure::config::ConfigLoader;
use gobby_infrastructure::transport::McpConnectionPool;
use gobby_infrastructure::{HandlebarsTemplateEngine, ReqwestHttpClientProvider};
use gobby_providers::database::{
    SqliteMcpServerRepository, SqliteMemoryRepository, SqliteSessionRepository, SqliteTaskRepository,
    SqliteWorkflowRepository,
};
use gobby_server::hooks::{DaemonReadiness, HookPipeline, HookPipelineDeps, ProjectResolver, SessionIdCache};
use gobby_server::plugin::PluginHost;
use gobby_server::webhook::{WebhookDispatcher, WebhookEndpointConfig};
use gobby_server::Broadcaster;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("gobby {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                println!("gobby {}", env!("CARGO_PKG_VERSION"));
                println!("Local daemon core for Gobby: hook pipeline, webhooks, plugins, broadcast.");
                println!();
                println!("The daemon is started by the front-end CLI integration and should not");
                println!("normally be invoked directly.");
                return Ok(());
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                eprintln!("Usage: gobby [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = ConfigLoader::new().load().map_err(|e| {
        eprintln!("failed to load config: {e}");
        e
    })?;

    let log_dir = gobby_infrastructure::config::gobby_home_dir().ok().map(|dir| dir.join("logs"));
    let _log_guard = gobby_infrastructure::logging::init_tracing(log_dir.as_deref(), false);

    tracing::info!("starting gobby daemon core");

    let pipeline = build_pipeline(&config).await?;

    tracing::info!("daemon core ready");
    println!("READY");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    drop(pipeline);
    Ok(())
}

/// Builds the full [`HookPipeline`] dependency graph from `config`.
async fn build_pipeline(config: &DaemonConfig) -> Result<HookPipeline, Box<dyn std::error::Error>> {
    let provider = resolve_database_provider("sqlite")?;
    let executor = provider.connect(std::path::Path::new(&config.database_path)).await?;

    let session_registry = Arc::new(SessionRegistry::new(Arc::new(SqliteSessionRepository::new(executor.clone()))));
    let task_registry = Arc::new(TaskRegistry::new(Arc::new(SqliteTaskRepository::new(executor.clone()))));
    let memory_registry = Arc::new(MemoryRegistry::new(Arc::new(SqliteMemoryRepository::new(executor.clone()))));
    let workflow_repository = Arc::new(SqliteWorkflowRepository::new(executor.clone()));
    let mcp_repository = Arc::new(SqliteMcpServerRepository::new(executor.clone()));

    let cwd = std::env::current_dir()?;
    let cwd = cwd.to_str().ok_or("current directory is not valid UTF-8")?;
    let project_resolver = Arc::new(ProjectResolver::new(executor.clone()));
    let project = project_resolver.resolve(cwd).await?;

    let tool_proxy = Arc::new(McpConnectionPool::new(project.id.clone(), mcp_repository));
    if let Err(e) = tool_proxy.connect_all().await {
        tracing::warn!(error = %e, "one or more MCP servers failed to connect at startup");
    }

    let readiness = Arc::new(DaemonReadiness::new());
    tokio::spawn(Arc::clone(&readiness).run_monitor(
        executor.clone(),
        Duration::from_secs(config.daemon_health_check_interval.max(1)),
    ));

    let http = Arc::new(ReqwestHttpClientProvider::default());
    let webhook_dispatcher = config.hook_extensions.webhooks.enabled.then(|| {
        let endpoints: Vec<WebhookEndpointConfig> = config
            .hook_extensions
            .webhooks
            .endpoints
            .iter()
            .map(WebhookEndpointConfig::from)
            .collect();
        Arc::new(WebhookDispatcher::new(endpoints, http))
    });

    let plugin_host = if config.hook_extensions.plugins.enabled && config.hook_extensions.plugins.auto_discover {
        Arc::new(PluginHost::discover(&config.hook_extensions.plugins.plugin_dirs))
    } else {
        Arc::new(PluginHost::empty())
    };

    let broadcaster = config
        .websocket
        .enabled
        .then(|| Arc::new(Broadcaster::new(parse_broadcast_events(&config.websocket.broadcast_events))));

    let deps = HookPipelineDeps {
        readiness,
        session_cache: Arc::new(SessionIdCache::new()),
        session_registry,
        task_registry,
        memory_registry,
        project_resolver,
        workflow_repository,
        template_engine: Arc::new(HandlebarsTemplateEngine::new()),
        tool_proxy,
        llm_service: None,
        transcript_processor: None,
        spawner: None,
        webhook_dispatcher,
        plugin_host,
        broadcaster,
        default_recall_limit: config.memory.default_recall_limit,
        importance_floor: config.memory.importance_floor,
        access_debounce_secs: i64::try_from(config.memory.access_debounce_secs).unwrap_or(i64::MAX),
        memory_enabled: true,
    };

    Ok(HookPipeline::new(deps))
}

fn parse_broadcast_events(names: &[String]) -> Vec<gobby_domain::value_objects::HookEventType> {
    names
        .iter()
        .filter_map(|name| serde_json::from_value(serde_json::Value::String(name.clone())).ok())
        .collect()
}
