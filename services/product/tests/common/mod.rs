//! 集成测试公共设施

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use product_service::context::RequestContext;
use product_service::domain::{NewProduct, Product, ProductId, ProductRepository};
use product_service::error::{StoreError, StoreResult};

/// 内存仓储，id 从 1 开始递增，行为与 `products` 表一致
#[derive(Default)]
pub struct InMemoryProductRepository {
    rows: Mutex<BTreeMap<ProductId, Product>>,
    sequence: AtomicI64,
    latency: Option<Duration>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次操作前先等待 `latency`，用于截止时间测试
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().expect("rows lock").len()
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, ctx: &RequestContext, product: &NewProduct) -> StoreResult<ProductId> {
        ctx.run("storage.create", async {
            self.pause().await;
            let id = ProductId(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
            let record = product.clone().with_id(id);
            self.rows.lock().expect("rows lock").insert(id, record);
            Ok(id)
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: ProductId) -> StoreResult<bool> {
        ctx.run("storage.delete", async {
            self.pause().await;
            Ok(self.rows.lock().expect("rows lock").remove(&id).is_some())
        })
        .await
    }

    async fn fetch(&self, ctx: &RequestContext, id: ProductId) -> StoreResult<Product> {
        const OP: &str = "storage.fetch";
        ctx.run(OP, async {
            self.pause().await;
            self.rows
                .lock()
                .expect("rows lock")
                .get(&id)
                .cloned()
                .ok_or(StoreError::NotFound { op: OP, id })
        })
        .await
    }

    async fn list_ids(&self, ctx: &RequestContext) -> StoreResult<Vec<ProductId>> {
        ctx.run("storage.list_ids", async {
            self.pause().await;
            Ok(self.rows.lock().expect("rows lock").keys().copied().collect())
        })
        .await
    }
}
