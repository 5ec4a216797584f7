use std::time::Duration;

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::{ApiError, ApiResult};

const MIGRATION_001: &str = include_str!("../migrations/001_comments.sql");

const MIGRATION_TIMEOUT: Duration = Duration::from_secs(3);

pub async fn connect(database_url: &str) -> ApiResult<DatabaseConnection> {
    Ok(Database::connect(database_url).await?)
}

/// Idempotent schema bootstrap, run synchronously at startup so a broken
/// database fails the process instead of the first request.
pub async fn ensure_schema(db: &DatabaseConnection) -> ApiResult<()> {
    tracing::info!("running db migration");
    tokio::time::timeout(MIGRATION_TIMEOUT, run_sql(db, MIGRATION_001))
        .await
        .map_err(|_| ApiError::Internal(anyhow::anyhow!("db migration timed out")))??;
    tracing::info!("db migration complete");
    Ok(())
}

async fn run_sql(db: &DatabaseConnection, sql: &str) -> ApiResult<()> {
    for stmt in sql.split(';') {
        let stmt = stmt.trim();
        if stmt.is_empty() {
            continue;
        }
        db.execute(Statement::from_string(db.get_database_backend(), stmt.to_string())).await?;
    }
    Ok(())
}
