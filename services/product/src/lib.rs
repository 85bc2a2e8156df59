//! Product catalog service
//!
//! 商品的创建、查询与删除，存储在 PostgreSQL `products` 表中。

pub mod api;
pub mod application;
pub mod context;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub mod proto {
    tonic::include_proto!("catalog.product.v1");

    /// 反射服务使用的文件描述符集
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("product_descriptor");
}
