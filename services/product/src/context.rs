//! 请求上下文：截止时间与取消信号
//!
//! 传输层为每次调用构造一个 [`RequestContext`]，一路传入存储调用。
//! 截止时间到达或 token 被取消时，正在执行的语句 future 会被丢弃。

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// 无截止时间、独立取消 token 的上下文
    pub fn background() -> Self {
        Self::default()
    }

    /// 从现在起 `timeout` 后到期
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.with_deadline(deadline)
    }

    /// 设置截止时间；已有截止时间时取较早者
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// 剩余时间，没有截止时间时为 `None`
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// 在截止时间与取消信号约束下执行一次存储调用
    pub async fn run<T, F>(&self, op: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        if self.cancellation.is_cancelled() {
            return Err(StoreError::Cancelled { op });
        }
        if self.is_expired() {
            return Err(StoreError::DeadlineExceeded { op });
        }

        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, fut)
                    .await
                    .unwrap_or_else(|_| Err(StoreError::DeadlineExceeded { op })),
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(StoreError::Cancelled { op }),
            result = bounded => result,
        }
    }
}
