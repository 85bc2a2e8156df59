//! 领域层

mod product;
mod repository;

pub use product::*;
pub use repository::*;
