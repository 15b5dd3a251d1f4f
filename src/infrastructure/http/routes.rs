//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/session/create    POST  创建会话
//! - /api/session/get       POST  获取会话（当前故事、是否有待读取的语音输入）
//! - /api/session/close     POST  关闭会话
//! - /api/story/generate    POST  生成故事
//! - /api/story/speak       POST  朗读当前故事（audio/wav）
//! - /api/voice/submit      POST  提交浏览器语音识别结果
//! - /api/voice/take        POST  取出并清空语音识别结果

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/session", session_routes())
        .nest("/story", story_routes())
        .nest("/voice", voice_routes())
}

/// Session 路由
fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_session))
        .route("/get", post(handlers::get_session))
        .route("/close", post(handlers::close_session))
}

/// Story 路由
fn story_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate_story))
        .route("/speak", post(handlers::speak_story))
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/submit", post(handlers::submit_voice_input))
        .route("/take", post(handlers::take_voice_input))
}
