//! HTTP Middleware
//!
//! 按 HTTP 状态码记录请求日志。
//! 业务错误以 HTTP 200 返回，由 ApiError::into_response() 自行记录，这里只覆盖
//! 路由不存在、JSON 解析失败、请求体超限等框架层错误。

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// 状态码日志中间件
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = latency_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = latency_ms,
            "HTTP client error"
        );
    } else {
        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = latency_ms,
            "HTTP request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    async fn echo(Json(body): Json<Value>) -> Json<Value> {
        Json(body)
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/echo", post(echo))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    fn post_echo(body: &'static str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/echo")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_passes_successful_response_through() {
        let response = create_test_router()
            .oneshot(post_echo(r#"{"ok": true}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_json_is_client_error() {
        let response = create_test_router()
            .oneshot(post_echo("{not json"))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = HttpRequest::builder()
            .uri("/missing")
            .body(Body::empty())
            .unwrap();
        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
