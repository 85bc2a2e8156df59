//! Product Service - 商品目录服务入口
//!
//! 使用 catalog-bootstrap 统一启动模式

use std::sync::Arc;

use catalog_bootstrap::{Infrastructure, run_with_services};
use catalog_errors::AppError;
use product_service::api::ProductServiceImpl;
use product_service::application::CatalogHandler;
use product_service::context::RequestContext;
use product_service::domain::ProductRepository;
use product_service::infrastructure::persistence::{PostgresProductRepository, run_migrations};
use product_service::proto::FILE_DESCRIPTOR_SET;
use product_service::proto::product_service_server::ProductServiceServer;
use tonic::transport::Server;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_with_services("config", |infra: Infrastructure, mut server: Server| async move {
        let pool = infra.postgres_pool();
        let config = infra.config();

        if config.database.run_migrations {
            run_migrations(&pool).await?;
        }

        // 组装 Repository 与 Handler
        let repo: Arc<dyn ProductRepository> = Arc::new(PostgresProductRepository::new(pool));
        let handler = Arc::new(CatalogHandler::new(repo));

        // 启动时统计现有商品数量
        let startup_ctx = RequestContext::background()
            .with_timeout(config.database.connect_timeout())
            .with_cancellation(infra.shutdown_token().child_token());
        let ids = handler.list_product_ids(&startup_ctx).await?;
        info!(product_count = ids.len(), "Product catalog loaded");

        let mut service = ProductServiceImpl::new(handler, infra.shutdown_token());
        if let Some(timeout) = config.server.request_timeout() {
            service = service.with_request_timeout(timeout);
        }

        // 构建反射服务
        let reflection_service = ReflectionBuilder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()
            .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))?;

        Ok(server
            .add_service(ProductServiceServer::new(service))
            .add_service(reflection_service))
    })
    .await
}
