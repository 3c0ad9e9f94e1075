//! SQLite implementation of [`McpServerRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use gobby_domain::entities::{McpServerConfig, McpTool};
use gobby_domain::error::Result;
use gobby_domain::ports::{DatabaseExecutor, McpServerRepository, SqlParam};

use super::query_helpers::query_all;
use super::row_convert::FromRow;
use super::row_helpers::{bool_param, opt_json_param, opt_str_param};

/// SQLite-backed [`McpServerRepository`].
pub struct SqliteMcpServerRepository {
    executor: Arc<dyn DatabaseExecutor>,
}

impl SqliteMcpServerRepository {
    /// Creates a repository over the given executor.
    #[must_use]
    pub fn new(executor: Arc<dyn DatabaseExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl McpServerRepository for SqliteMcpServerRepository {
    async fn list_servers(&self, project_id: &str) -> Result<Vec<McpServerConfig>> {
        query_all(
            &self.executor,
            "SELECT * FROM mcp_servers WHERE project_id = ? ORDER BY name ASC",
            &[SqlParam::String(project_id.to_owned())],
            McpServerConfig::from_row,
            "mcp_server",
        )
        .await
    }

    async fn get_server(&self, project_id: &str, name: &str) -> Result<Option<McpServerConfig>> {
        super::query_helpers::query_one(
            &self.executor,
            "SELECT * FROM mcp_servers WHERE project_id = ? AND name = ?",
            &[
                SqlParam::String(project_id.to_owned()),
                SqlParam::String(name.to_owned()),
            ],
            McpServerConfig::from_row,
        )
        .await
    }

    async fn insert_server(&self, config: &McpServerConfig) -> Result<()> {
        self.executor
            .execute(
                "INSERT INTO mcp_servers (\
                    id, name, project_id, transport, url, command, args, env, headers, enabled, \
                    description, created_at, updated_at\
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                &[
                    SqlParam::String(config.id.clone()),
                    SqlParam::String(config.name.clone()),
                    SqlParam::String(config.project_id.clone()),
                    SqlParam::String(config.transport.as_str().to_owned()),
                    opt_str_param(config.url.as_ref()),
                    opt_str_param(config.command.as_ref()),
                    opt_json_param(config.args.as_ref())?,
                    opt_json_param(config.env.as_ref())?,
                    opt_json_param(config.headers.as_ref())?,
                    bool_param(config.enabled),
                    opt_str_param(config.description.as_ref()),
                    SqlParam::String(config.created_at.clone()),
                    SqlParam::String(config.updated_at.clone()),
                ],
            )
            .await?;
        Ok(())
    }

    async fn delete_server(&self, project_id: &str, name: &str) -> Result<()> {
        self.executor
            .execute(
                "DELETE FROM mcp_servers WHERE project_id = ? AND name = ?",
                &[
                    SqlParam::String(project_id.to_owned()),
                    SqlParam::String(name.to_owned()),
                ],
            )
            .await?;
        Ok(())
    }

    async fn replace_tools(&self, server_id: &str, tools: &[McpTool]) -> Result<()> {
        self.executor
            .execute(
                "DELETE FROM mcp_tools WHERE mcp_server_id = ?",
                &[SqlParam::String(server_id.to_owned())],
            )
            .await?;
        for tool in tools {
            self.executor
                .execute(
                    "INSERT INTO mcp_tools (\
                        id, mcp_server_id, name, description, input_schema, created_at, \
                        updated_at\
                    ) VALUES (?, ?, ?, ?, ?, ?, ?)",
                    &[
                        SqlParam::String(tool.id.clone()),
                        SqlParam::String(tool.mcp_server_id.clone()),
                        SqlParam::String(tool.name.clone()),
                        opt_str_param(tool.description.as_ref()),
                        opt_json_param(tool.input_schema.as_ref())?,
                        SqlParam::String(tool.created_at.clone()),
                        SqlParam::String(tool.updated_at.clone()),
                    ],
                )
                .await?;
        }
        Ok(())
    }

    async fn list_tools(&self, server_id: &str) -> Result<Vec<McpTool>> {
        query_all(
            &self.executor,
            "SELECT * FROM mcp_tools WHERE mcp_server_id = ? ORDER BY name ASC",
            &[SqlParam::String(server_id.to_owned())],
            McpTool::from_row,
            "mcp_tool",
        )
        .await
    }
}
