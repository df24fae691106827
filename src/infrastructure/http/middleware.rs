//! HTTP Middleware
//!
//! 请求耗时与错误状态码日志

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// 错误状态码日志中间件
///
/// 5xx 记为 error，其余在 debug 级别输出状态码与耗时
/// 业务 4xx 的 warn 日志在 ApiError::into_response() 中记录，这里不重复
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP request completed"
        );
    }

    response
}
