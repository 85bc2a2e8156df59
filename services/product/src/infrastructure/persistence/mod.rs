//! 持久化实现

mod postgres;
mod rows;

pub use postgres::*;
pub use rows::*;

use catalog_errors::{AppError, AppResult};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

/// 内嵌的数据库迁移
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// 执行待应用的迁移
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to run migrations: {}", e)))?;
    info!("Database migrations applied");
    Ok(())
}
