//! grpc-timeout 解析与请求上下文构造

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tonic::Request;

use crate::context::RequestContext;

/// gRPC 截止时间请求头
pub const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// 解析 `grpc-timeout` 头：1-8 位数字加单位 `H M S m u n`
pub fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if !value.is_ascii() || value.len() < 2 || value.len() > 9 {
        return None;
    }

    let (digits, unit) = value.split_at(value.len() - 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    let timeout = match unit {
        "H" => Duration::from_secs(amount * 60 * 60),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(timeout)
}

/// 为一次调用构造请求上下文
///
/// 截止时间取客户端 `grpc-timeout` 与服务端 `default_timeout` 中较早者；
/// 取消 token 派生自进程关闭 token。
pub fn request_context<T>(
    request: &Request<T>,
    default_timeout: Option<Duration>,
    shutdown: &CancellationToken,
) -> RequestContext {
    let mut ctx = RequestContext::background().with_cancellation(shutdown.child_token());

    if let Some(timeout) = default_timeout {
        ctx = ctx.with_timeout(timeout);
    }

    let client_timeout = request
        .metadata()
        .get(GRPC_TIMEOUT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_grpc_timeout);
    if let Some(timeout) = client_timeout {
        ctx = ctx.with_timeout(timeout);
    }

    ctx
}
