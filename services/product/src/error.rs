//! 存储层错误

use catalog_errors::AppError;
use thiserror::Error;

use crate::domain::ProductId;

/// 存储层错误，每个变体都带有产生它的操作名
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{op}: product {id} not found")]
    NotFound { op: &'static str, id: ProductId },

    #[error("{op}: write failed: {source}")]
    Write {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{op}: read failed: {source}")]
    Read {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{op}: deadline exceeded")]
    DeadlineExceeded { op: &'static str },

    #[error("{op}: cancelled")]
    Cancelled { op: &'static str },
}

impl StoreError {
    pub fn write(op: &'static str, source: sqlx::Error) -> Self {
        Self::Write { op, source }
    }

    pub fn read(op: &'static str, source: sqlx::Error) -> Self {
        Self::Read { op, source }
    }

    /// 产生错误的存储操作
    pub fn op(&self) -> &'static str {
        match self {
            Self::NotFound { op, .. }
            | Self::Write { op, .. }
            | Self::Read { op, .. }
            | Self::DeadlineExceeded { op }
            | Self::Cancelled { op } => op,
        }
    }

    /// 用于 metrics 标签
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Write { .. } => "write_error",
            Self::Read { .. } => "read_error",
            Self::DeadlineExceeded { .. } => "deadline_exceeded",
            Self::Cancelled { .. } => "cancelled",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// 附加调用方的操作名并转换为应用错误
    ///
    /// NotFound 保持为 NotFound，读写失败统一归为 Database。
    pub fn into_app_error(self, op: &str) -> AppError {
        let message = format!("{}: {}", op, self);
        match self {
            Self::NotFound { .. } => AppError::not_found(message),
            Self::Write { .. } | Self::Read { .. } => AppError::database(message),
            Self::DeadlineExceeded { .. } => AppError::deadline_exceeded(message),
            Self::Cancelled { .. } => AppError::cancelled(message),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
