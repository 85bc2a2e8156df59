//! PostgreSQL 商品仓储实现

use std::time::Instant;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, warn};

use super::rows::ProductRow;
use crate::context::RequestContext;
use crate::domain::{NewProduct, Product, ProductId, ProductRepository};
use crate::error::{StoreError, StoreResult};

// 语句均为静态文本，表名与列名不在运行时拼接
const INSERT_PRODUCT: &str = "INSERT INTO products (image_url, title, description, price, currency, discount, product_url) \
     VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id";

const DELETE_PRODUCT: &str = "DELETE FROM products WHERE id = $1";

const SELECT_PRODUCT: &str = "SELECT id, image_url, title, description, price, currency, discount, product_url \
     FROM products WHERE id = $1";

const SELECT_PRODUCT_IDS: &str = "SELECT id FROM products ORDER BY id";

#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, ctx: &RequestContext, product: &NewProduct) -> StoreResult<ProductId> {
        const OP: &str = "storage.create";
        let started = Instant::now();

        let result = ctx
            .run(OP, async {
                sqlx::query_scalar::<_, i64>(INSERT_PRODUCT)
                    .bind(&product.image_url)
                    .bind(&product.title)
                    .bind(&product.description)
                    .bind(product.price)
                    .bind(product.currency)
                    .bind(i16::from(product.discount))
                    .bind(&product.product_url)
                    .fetch_one(&self.pool)
                    .await
                    .map(ProductId)
                    .map_err(|e| StoreError::write(OP, e))
            })
            .await;

        observe(OP, started, &result);
        result
    }

    async fn delete(&self, ctx: &RequestContext, id: ProductId) -> StoreResult<bool> {
        const OP: &str = "storage.delete";
        let started = Instant::now();

        let result = ctx
            .run(OP, async {
                let done = sqlx::query(DELETE_PRODUCT)
                    .bind(id.0)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| StoreError::write(OP, e))?;

                match done.rows_affected() {
                    0 => {
                        warn!(op = OP, id = id.0, "No product to delete");
                        Ok(false)
                    }
                    1 => Ok(true),
                    n => Err(StoreError::write(
                        OP,
                        sqlx::Error::Protocol(format!("delete by id matched {} rows", n)),
                    )),
                }
            })
            .await;

        observe(OP, started, &result);
        result
    }

    async fn fetch(&self, ctx: &RequestContext, id: ProductId) -> StoreResult<Product> {
        const OP: &str = "storage.fetch";
        let started = Instant::now();

        let result = ctx
            .run(OP, async {
                let row = sqlx::query_as::<_, ProductRow>(SELECT_PRODUCT)
                    .bind(id.0)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| StoreError::read(OP, e))?
                    .ok_or(StoreError::NotFound { op: OP, id })?;

                Product::try_from(row).map_err(|e| StoreError::read(OP, e))
            })
            .await;

        observe(OP, started, &result);
        result
    }

    async fn list_ids(&self, ctx: &RequestContext) -> StoreResult<Vec<ProductId>> {
        const OP: &str = "storage.list_ids";
        let started = Instant::now();

        let result = ctx
            .run(OP, async {
                sqlx::query_scalar::<_, i64>(SELECT_PRODUCT_IDS)
                    .fetch_all(&self.pool)
                    .await
                    .map(|ids| ids.into_iter().map(ProductId).collect())
                    .map_err(|e| StoreError::read(OP, e))
            })
            .await;

        observe(OP, started, &result);
        result
    }
}

/// 记录一次存储操作的耗时、结果与日志
fn observe<T>(op: &'static str, started: Instant, result: &StoreResult<T>) {
    let elapsed = started.elapsed();
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };

    metrics::counter!("catalog_store_operations_total", "op" => op, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("catalog_store_duration_seconds", "op" => op)
        .record(elapsed.as_secs_f64());

    match result {
        Ok(_) => debug!(op, elapsed_ms = elapsed.as_millis() as u64, "Store operation completed"),
        Err(e) if e.is_not_found() => debug!(op, error = %e, "Product not found"),
        Err(e) => error!(op, error = %e, "Store operation failed"),
    }
}
