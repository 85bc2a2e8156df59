//! 服务运行时

use std::net::SocketAddr;

use catalog_config::AppConfig;
use catalog_telemetry::{init_metrics, init_tracing, init_tracing_json};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// 初始化服务运行时（tracing + metrics）
pub fn init_runtime(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    if let Some(port) = config.telemetry.metrics_port {
        let addr: SocketAddr = format!("{}:{}", config.server.host, port).parse()?;
        init_metrics(addr)?;
        info!(%addr, "Prometheus exporter listening");
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );

    Ok(())
}

/// 等待关闭信号，随后取消 `shutdown`，使所有在途请求的存储调用中止
pub async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = shutdown.cancelled() => {},
    }

    info!("Shutdown signal received");
    shutdown.cancel();
}
