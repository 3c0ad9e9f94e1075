//! SQLite Database Provider
//!
//! # Overview
//! `SqliteDatabaseProvider` is the factory and lifecycle manager for SQLite
//! connections backing the daemon's embedded relational store. It opens the
//! database file, runs the migration chain, and hands back a shared
//! [`DatabaseExecutor`] for repositories to depend on.
//!
//! # Responsibilities
//! - **Connection management**: pooling and configuring SQLite (WAL mode).
//! - **Schema migration**: applying the versioned migration chain at startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::infrastructure::database::{DatabaseExecutor, DatabaseProvider};
use gobby_domain::registry::database::{DATABASE_PROVIDERS, DatabaseProviderEntry};

use super::{SqliteExecutor, migrator};

/// SQLite implementation of the [`DatabaseProvider`] port.
pub struct SqliteDatabaseProvider;

fn build_sqlite_database_provider() -> Arc<dyn DatabaseProvider> {
    Arc::new(SqliteDatabaseProvider)
}

#[linkme::distributed_slice(DATABASE_PROVIDERS)]
static SQLITE_DATABASE_PROVIDER: DatabaseProviderEntry = DatabaseProviderEntry {
    name: "sqlite",
    build: build_sqlite_database_provider,
};

#[async_trait]
impl DatabaseProvider for SqliteDatabaseProvider {
    async fn connect(&self, path: &Path) -> Result<Arc<dyn DatabaseExecutor>> {
        let pool = connect_and_init(path.to_path_buf()).await?;
        Ok(Arc::new(SqliteExecutor::new(pool)))
    }

    async fn connect_in_memory(&self) -> Result<Arc<dyn DatabaseExecutor>> {
        let pool = connect_in_memory_and_init().await?;
        Ok(Arc::new(SqliteExecutor::new(pool)))
    }
}

async fn connect_and_init(path: PathBuf) -> Result<sqlx::SqlitePool> {
    tracing::info!(path = %path.display(), "connecting to SQLite database");

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::database_with_source("create database directory", e))?;
    }
    let db_url = format!("sqlite:{}?mode=rwc", path.display());
    let pool = sqlx::SqlitePool::connect(&db_url)
        .await
        .map_err(|e| Error::database_with_source("connect SQLite", e))?;

    enable_pragmas(&pool).await?;
    migrator::run(&pool).await?;
    tracing::info!(path = %path.display(), "database initialized");
    Ok(pool)
}

async fn connect_in_memory_and_init() -> Result<sqlx::SqlitePool> {
    let pool = sqlx::SqlitePool::connect("sqlite::memory:")
        .await
        .map_err(|e| Error::database_with_source("connect in-memory SQLite", e))?;
    migrator::run(&pool).await?;
    tracing::debug!("in-memory database initialized");
    Ok(pool)
}

async fn enable_pragmas(pool: &sqlx::SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA journal_mode = WAL;")
        .execute(pool)
        .await
        .map_err(|e| Error::database_with_source("enable WAL mode", e))?;
    sqlx::query("PRAGMA synchronous = NORMAL;")
        .execute(pool)
        .await
        .map_err(|e| Error::database_with_source("set synchronous mode", e))?;
    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(pool)
        .await
        .map_err(|e| Error::database_with_source("enable foreign keys", e))?;
    Ok(())
}
