//! 商品仓储接口

use async_trait::async_trait;

use super::{NewProduct, Product, ProductId};
use crate::context::RequestContext;
use crate::error::StoreResult;

/// 商品仓储接口
///
/// 每个操作只执行一条语句、最多影响一行，并受 `ctx` 的截止时间与取消信号约束。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 插入一行，返回数据库生成的 id
    async fn create(&self, ctx: &RequestContext, product: &NewProduct) -> StoreResult<ProductId>;

    /// 物理删除；恰好删除一行返回 `true`，没有匹配行返回 `false`
    async fn delete(&self, ctx: &RequestContext, id: ProductId) -> StoreResult<bool>;

    /// 读取完整行；不存在时返回 `StoreError::NotFound`
    async fn fetch(&self, ctx: &RequestContext, id: ProductId) -> StoreResult<Product>;

    /// 列出当前所有 id（维护用途）
    async fn list_ids(&self, ctx: &RequestContext) -> StoreResult<Vec<ProductId>>;
}
