//! catalog-bootstrap - 统一服务启动骨架
//!
//! 配置加载、遥测初始化、连接池创建与 gRPC 服务器生命周期

mod infrastructure;
mod runtime;
mod starter;

pub use infrastructure::*;
pub use runtime::*;
pub use starter::*;
