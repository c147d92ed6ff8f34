use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::utils::error::{AppError, AppResult};

const SCHEMA: &str = include_str!("schema.sql");

pub async fn init_db() -> AppResult<SqlitePool> {
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://polls.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)
        .map_err(|e| AppError::DatabaseError(format!("Invalid DATABASE_URL: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect to {}: {}", database_url, e)))?;

    apply_schema(&pool).await?;

    info!("Database ready at {}", database_url);

    Ok(pool)
}

/// Applies the embedded schema. Every statement is `IF NOT EXISTS`, so this
/// runs on each startup and against fresh test databases.
pub async fn apply_schema(pool: &SqlitePool) -> AppResult<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
