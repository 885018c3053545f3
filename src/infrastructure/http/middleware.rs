//! HTTP Middleware
//!
//! 按状态码记录失败请求，附带耗时

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 4xx 记 warn，5xx 记 error
///
/// 后端失败的详情由 `ApiError::into_response()` 记录，这里只记录请求层面的信息；
/// 请求体解析失败（400/413/415/422）只会出现在这里
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
            "Request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "Request rejected"
        );
    }

    response
}
