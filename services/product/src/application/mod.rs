//! 应用层

mod commands;
mod handler;

pub use commands::*;
pub use handler::*;
