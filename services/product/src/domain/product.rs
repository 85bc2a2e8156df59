//! 商品实体

use std::fmt;

/// 创建请求未携带折扣时使用的默认值
pub const DEFAULT_DISCOUNT: u8 = 0;

/// 创建请求未携带商品链接时使用的默认值
pub const DEFAULT_PRODUCT_URL: &str = "";

/// 折扣百分比上限
pub const MAX_DISCOUNT: u8 = 100;

/// 商品 ID，由数据库序列生成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 已持久化的商品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub image_url: String,
    pub title: String,
    pub description: String,
    /// 最小货币单位
    pub price: i64,
    /// 货币代码
    pub currency: i32,
    /// 折扣百分比 (0-100)
    pub discount: u8,
    pub product_url: String,
}

/// 待插入的商品，不含 id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub discount: u8,
    pub price: i64,
    pub currency: i32,
    pub product_url: String,
}

impl NewProduct {
    /// 以存储分配的 id 组装完整实体
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            image_url: self.image_url,
            title: self.title,
            description: self.description,
            price: self.price,
            currency: self.currency,
            discount: self.discount,
            product_url: self.product_url,
        }
    }
}
