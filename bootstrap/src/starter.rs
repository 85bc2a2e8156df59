//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;

use catalog_config::AppConfig;
use catalog_errors::AppResult;
use tonic::transport::Server;
use tonic::transport::server::Router;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 构建 gRPC 服务器
///
/// 不设置 tonic 的全局超时，调用截止时间由各服务的请求上下文处理，
/// 超时以 `DEADLINE_EXCEEDED` 返回并带有操作名。
pub fn grpc_server() -> Server {
    Server::builder()
}

/// 运行 gRPC 服务
///
/// 所有服务的统一入口点。它负责：
/// 1. 加载 `.env` 与配置
/// 2. 初始化运行时（日志、metrics）
/// 3. 创建基础设施资源（数据库连接池、关闭信号）
/// 4. 调用闭包注册 gRPC 服务
/// 5. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use catalog_bootstrap::run_with_services;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_with_services("config", |infra, mut server| async move {
///         let service = MyServiceImpl::new(infra.postgres_pool());
///         Ok(server.add_service(MyServiceServer::new(service)))
///     })
///     .await
/// }
/// ```
pub async fn run_with_services<F, Fut>(
    config_dir: &str,
    server_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure, Server) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    dotenvy::dotenv().ok();

    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config)?;

    info!("Starting {} service", config.app_name);

    // 3. 构建服务地址
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // 4. 创建基础设施
    let infra = Infrastructure::from_config(config.clone()).await?;
    let shutdown = infra.shutdown_token();

    // 5. 让服务注册自身
    let server = grpc_server();
    let router = server_builder(infra, server).await?;

    info!(%addr, "gRPC server starting");

    // 6. 启动服务器
    router
        .serve_with_shutdown(addr, shutdown_signal(shutdown))
        .await?;

    info!("Service stopped");

    Ok(())
}
