//! Ping Handler
//!
//! 健康检查，不访问会话也不访问上游

use axum::Json;
use serde::Serialize;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Ping endpoint
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
