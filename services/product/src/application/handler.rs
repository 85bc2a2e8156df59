//! 商品目录业务处理

use std::sync::Arc;

use catalog_errors::{AppError, AppResult};
use tracing::info;

use super::commands::NewProductCommand;
use crate::context::RequestContext;
use crate::domain::{Product, ProductId, ProductRepository};

/// 商品目录处理器
///
/// 无状态，可在并发调用间共享。存储错误在返回前附加本层操作名，不做重试。
pub struct CatalogHandler {
    repo: Arc<dyn ProductRepository>,
}

impl CatalogHandler {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// 创建商品，返回存储分配的 id
    pub async fn new_product(
        &self,
        ctx: &RequestContext,
        cmd: NewProductCommand,
    ) -> AppResult<ProductId> {
        const OP: &str = "catalog.NewProduct";

        cmd.validate()
            .map_err(|reason| AppError::validation(format!("{}: {}", OP, reason)))?;

        let product = cmd.into_new_product();
        let id = self
            .repo
            .create(ctx, &product)
            .await
            .map_err(|e| e.into_app_error(OP))?;

        info!(product_id = id.0, "Product created");
        Ok(id)
    }

    /// 查询商品
    pub async fn get_product(&self, ctx: &RequestContext, id: ProductId) -> AppResult<Product> {
        const OP: &str = "catalog.GetProduct";

        self.repo
            .fetch(ctx, id)
            .await
            .map_err(|e| e.into_app_error(OP))
    }

    /// 删除商品；id 不存在时返回 `false`
    pub async fn delete_product(&self, ctx: &RequestContext, id: ProductId) -> AppResult<bool> {
        const OP: &str = "catalog.DeleteProduct";

        let deleted = self
            .repo
            .delete(ctx, id)
            .await
            .map_err(|e| e.into_app_error(OP))?;

        if deleted {
            info!(product_id = id.0, "Product deleted");
        }
        Ok(deleted)
    }

    /// 列出所有商品 id（维护用途，不对外暴露）
    pub async fn list_product_ids(&self, ctx: &RequestContext) -> AppResult<Vec<ProductId>> {
        const OP: &str = "catalog.ListProductIds";

        self.repo
            .list_ids(ctx)
            .await
            .map_err(|e| e.into_app_error(OP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockProductRepository, NewProduct};
    use crate::error::StoreError;

    fn command() -> NewProductCommand {
        NewProductCommand {
            image_url: "http://x/a.png".to_string(),
            title: "Mug".to_string(),
            description: "ceramic mug".to_string(),
            price: 999,
            currency: 840,
        }
    }

    fn handler(repo: MockProductRepository) -> CatalogHandler {
        CatalogHandler::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_new_product_forwards_with_defaults() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .times(1)
            .withf(|_, product: &NewProduct| {
                product.image_url == "http://x/a.png"
                    && product.title == "Mug"
                    && product.description == "ceramic mug"
                    && product.price == 999
                    && product.currency == 840
                    && product.discount == 0
                    && product.product_url.is_empty()
            })
            .returning(|_, _| Ok(ProductId(42)));

        let id = handler(repo)
            .new_product(&RequestContext::background(), command())
            .await
            .expect("create should succeed");
        assert_eq!(id, ProductId(42));
    }

    #[tokio::test]
    async fn test_new_product_rejects_negative_price_without_store_call() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();

        let mut cmd = command();
        cmd.price = -5;

        let err = handler(repo)
            .new_product(&RequestContext::background(), cmd)
            .await
            .expect_err("negative price");
        assert!(matches!(err, AppError::Validation(ref msg) if msg.starts_with("catalog.NewProduct")));
    }

    #[tokio::test]
    async fn test_new_product_write_failure_is_tagged() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .returning(|_, _| Err(StoreError::write("storage.create", sqlx::Error::PoolTimedOut)));

        let err = handler(repo)
            .new_product(&RequestContext::background(), command())
            .await
            .expect_err("write failure");
        assert!(matches!(
            err,
            AppError::Database(ref msg) if msg.starts_with("catalog.NewProduct: storage.create:")
        ));
    }

    #[tokio::test]
    async fn test_get_product_returns_fetched_record() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch()
            .withf(|_, id| *id == ProductId(1))
            .returning(|_, id| {
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

        let product = handler(repo)
            .get_product(&RequestContext::background(), ProductId(1))
            .await
            .expect("fetch should succeed");
        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.title, "Mug");
        assert_eq!(product.price, 999);
    }

    #[tokio::test]
    async fn test_get_product_not_found_is_distinct() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch().returning(|_, id| {
            Err(StoreError::NotFound {
                op: "storage.fetch",
                id,
            })
        });

        let err = handler(repo)
            .get_product(&RequestContext::background(), ProductId(77))
            .await
            .expect_err("missing product");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("catalog.GetProduct: storage.fetch: product 77"));
    }

    #[tokio::test]
    async fn test_get_product_read_failure_is_fault() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch()
            .returning(|_, _| Err(StoreError::read("storage.fetch", sqlx::Error::PoolClosed)));

        let err = handler(repo)
            .get_product(&RequestContext::background(), ProductId(1))
            .await
            .expect_err("read failure");
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_delete_product_passes_boolean_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .withf(|_, id| *id == ProductId(1))
            .returning(|_, _| Ok(true));
        repo.expect_delete()
            .withf(|_, id| *id == ProductId(2))
            .returning(|_, _| Ok(false));
        let handler = handler(repo);
        let ctx = RequestContext::background();

        assert!(handler.delete_product(&ctx, ProductId(1)).await.expect("delete"));
        assert!(!handler.delete_product(&ctx, ProductId(2)).await.expect("delete"));
    }

    #[tokio::test]
    async fn test_delete_deadline_surfaces_as_deadline_exceeded() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .returning(|_, _| Err(StoreError::DeadlineExceeded { op: "storage.delete" }));

        let err = handler(repo)
            .delete_product(&RequestContext::background(), ProductId(1))
            .await
            .expect_err("deadline");
        assert!(matches!(err, AppError::DeadlineExceeded(_)));
    }

    #[tokio::test]
    async fn test_list_product_ids() {
        let mut repo = MockProductRepository::new();
        repo.expect_list_ids()
            .returning(|_| Ok(vec![ProductId(1), ProductId(3)]));

        let ids = handler(repo)
            .list_product_ids(&RequestContext::background())
            .await
            .expect("list");
        assert_eq!(ids, vec![ProductId(1), ProductId(3)]);
    }
}
