//! API layer - gRPC service implementation

mod conversions;
mod deadline;
mod grpc_service;

pub use deadline::*;
pub use grpc_service::ProductServiceImpl;
