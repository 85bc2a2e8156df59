//! PostgreSQL 连接管理

use catalog_errors::{AppError, AppResult};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::PostgresConfig;

/// 创建 PostgreSQL 连接池
///
/// 连接池本身惰性建连，随后在 `connect_timeout` 内完成一次 ping，
/// 确保返回的句柄可用。
pub async fn create_pool(config: &PostgresConfig) -> AppResult<PgPool> {
    let options = config
        .connect_options()
        .map_err(|e| AppError::database(format!("Invalid connection options: {}", e)))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.pool_max)
        .min_connections(config.pool_min)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect_lazy_with(options);

    tokio::time::timeout(config.connect_timeout, check_connection(&pool))
        .await
        .map_err(|_| {
            AppError::database(format!(
                "Timed out connecting to {} after {:?}",
                config.target(),
                config.connect_timeout
            ))
        })??;

    info!(
        target_db = %config.target(),
        max_connections = config.pool_max,
        "PostgreSQL connection pool created"
    );

    Ok(pool)
}

/// 检查数据库连接
pub async fn check_connection(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Database health check failed: {}", e)))?;
    Ok(())
}
