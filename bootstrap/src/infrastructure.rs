//! 基础设施资源管理

use catalog_adapter_postgres::{PostgresConfig, SslMode, create_pool};
use catalog_config::{AppConfig, DatabaseConfig};
use catalog_errors::{AppError, AppResult};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// 基础设施资源容器
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 连接池
    postgres_pool: PgPool,
    /// 进程级关闭信号，请求上下文以其子 token 派生
    shutdown: CancellationToken,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 连接失败直接返回错误，不做重试。
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let pg_config = postgres_config(&config.database, &config.app_name)?;
        let postgres_pool = create_pool(&pg_config).await?;

        Ok(Self {
            config,
            postgres_pool,
            shutdown: CancellationToken::new(),
        })
    }

    /// 应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// PostgreSQL 连接池（PgPool 内部为 Arc，克隆开销很小）
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 进程级关闭 token
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}

/// 将应用层数据库配置转换为适配器配置
pub fn postgres_config(db: &DatabaseConfig, app_name: &str) -> AppResult<PostgresConfig> {
    let ssl_mode: SslMode = db
        .ssl_mode
        .parse()
        .map_err(|e| AppError::validation(format!("database.ssl_mode: {}", e)))?;

    let mut config = match &db.url {
        Some(url) => PostgresConfig::new(url.expose_secret().clone()),
        None => {
            let config =
                PostgresConfig::from_components(&db.host, db.port, &db.dbname, &db.username);
            match &db.password {
                Some(password) => config.with_password(password.expose_secret().clone()),
                None => config,
            }
        }
    };

    config = config
        .with_ssl_mode(ssl_mode)
        .with_max_connections(db.max_connections)
        .with_connect_timeout(db.connect_timeout())
        .with_application_name(app_name);

    if let Some(timeout) = db.statement_timeout() {
        config = config.with_statement_timeout(timeout);
    }

    Ok(config)
}
