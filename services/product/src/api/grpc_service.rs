//! gRPC service implementation

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};

use super::deadline::request_context;
use crate::application::{CatalogHandler, NewProductCommand};
use crate::context::RequestContext;
use crate::domain::ProductId;
use crate::proto::product_service_server::ProductService;
use crate::proto::{
    DeleteProductRequest, DeleteProductResponse, GetProductRequest, GetProductResponse,
    NewProductRequest, NewProductResponse,
};

pub struct ProductServiceImpl {
    handler: Arc<CatalogHandler>,
    request_timeout: Option<Duration>,
    shutdown: CancellationToken,
}

impl ProductServiceImpl {
    pub fn new(handler: Arc<CatalogHandler>, shutdown: CancellationToken) -> Self {
        Self {
            handler,
            request_timeout: None,
            shutdown,
        }
    }

    /// 服务端为每次调用设置的最长时间
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    fn context<T>(&self, request: &Request<T>) -> RequestContext {
        request_context(request, self.request_timeout, &self.shutdown)
    }
}

#[tonic::async_trait]
impl ProductService for ProductServiceImpl {
    async fn new_product(
        &self,
        request: Request<NewProductRequest>,
    ) -> Result<Response<NewProductResponse>, Status> {
        let ctx = self.context(&request);
        let cmd = NewProductCommand::from(request.into_inner());

        let id = self.handler.new_product(&ctx, cmd).await?;

        Ok(Response::new(NewProductResponse { id: id.0 }))
    }

    async fn get_product(
        &self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<GetProductResponse>, Status> {
        let ctx = self.context(&request);
        let id = ProductId(request.into_inner().id);

        let product = self.handler.get_product(&ctx, id).await?;

        Ok(Response::new(product.into()))
    }

    async fn delete_product(
        &self,
        request: Request<DeleteProductRequest>,
    ) -> Result<Response<DeleteProductResponse>, Status> {
        let ctx = self.context(&request);
        let id = ProductId(request.into_inner().id);

        let is_deleted = self.handler.delete_product(&ctx, id).await?;

        Ok(Response::new(DeleteProductResponse { is_deleted }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockProductRepository, Product};
    use crate::error::StoreError;

    fn service(repo: MockProductRepository) -> ProductServiceImpl {
        let handler = Arc::new(CatalogHandler::new(Arc::new(repo)));
        ProductServiceImpl::new(handler, CancellationToken::new())
            .with_request_timeout(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_new_product_returns_store_id() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().returning(|_, _| Ok(ProductId(1)));

        let response = service(repo)
            .new_product(Request::new(NewProductRequest {
                image_url: "http://x/a.png".to_string(),
                title: "Mug".to_string(),
                description: "ceramic mug".to_string(),
                price: 999,
                currency: 840,
            }))
            .await
            .expect("new product");

        assert_eq!(response.into_inner().id, 1);
    }

    #[tokio::test]
    async fn test_new_product_invalid_argument() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();

        let status = service(repo)
            .new_product(Request::new(NewProductRequest {
                price: -1,
                ..Default::default()
            }))
            .await
            .expect_err("invalid price");

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_get_product_populates_response() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch().returning(|_, id| {
            Ok(Product {
                id,
                image_url: "http://x/a.png".to_string(),
                title: "Mug".to_string(),
                description: "ceramic mug".to_string(),
                price: 999,
                currency: 840,
                discount: 0,
                product_url: String::new(),
            })
        });

        let response = service(repo)
            .get_product(Request::new(GetProductRequest { id: 1 }))
            .await
            .expect("get product")
            .into_inner();

        assert_eq!(response.id, 1);
        assert_eq!(response.image_url, "http://x/a.png");
        assert_eq!(response.title, "Mug");
        assert_eq!(response.description, "ceramic mug");
        assert_eq!(response.price, 999);
        assert_eq!(response.currency, 840);
        assert_eq!(response.discount, 0);
        assert_eq!(response.product_url, "");
    }

    #[tokio::test]
    async fn test_get_product_not_found_status() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch().returning(|_, id| {
            Err(StoreError::NotFound {
                op: "storage.fetch",
                id,
            })
        });

        let status = service(repo)
            .get_product(Request::new(GetProductRequest { id: 404 }))
            .await
            .expect_err("not found");

        assert_eq!(status.code(), tonic::Code::NotFound);
    }

    #[tokio::test]
    async fn test_get_product_read_failure_status() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch()
            .returning(|_, _| Err(StoreError::read("storage.fetch", sqlx::Error::PoolClosed)));

        let status = service(repo)
            .get_product(Request::new(GetProductRequest { id: 1 }))
            .await
            .expect_err("read failure");

        assert_eq!(status.code(), tonic::Code::Internal);
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_an_error() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().returning(|_, _| Ok(false));

        let response = service(repo)
            .delete_product(Request::new(DeleteProductRequest { id: 12 }))
            .await
            .expect("delete");

        assert!(!response.into_inner().is_deleted);
    }

    #[tokio::test]
    async fn test_deadline_reaches_store_call() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .withf(|ctx, _| {
                ctx.remaining()
                    .is_some_and(|remaining| remaining <= Duration::from_millis(100))
            })
            .returning(|_, _| Ok(true));

        let mut request = Request::new(DeleteProductRequest { id: 1 });
        request
            .metadata_mut()
            .insert("grpc-timeout", "100m".parse().expect("metadata value"));

        let response = service(repo)
            .delete_product(request)
            .await
            .expect("delete");

        assert!(response.into_inner().is_deleted);
    }
}
