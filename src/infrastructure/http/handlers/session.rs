//! Session Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::{CloseSessionCommand, CreateSessionCommand, GetSession};
use crate::infrastructure::http::dto::{ApiResponse, Empty, SessionIdRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Create Session
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateSessionResponseDto {
    pub session_id: String,
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CreateSessionResponseDto>>, ApiError> {
    let result = state
        .create_session_handler
        .handle(CreateSessionCommand)
        .await?;

    Ok(Json(ApiResponse::success(CreateSessionResponseDto {
        session_id: result.session_id,
    })))
}

// ============================================================================
// Get Session
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SessionResponseDto {
    pub session_id: String,
    pub story: Option<String>,
    pub has_voice_input: bool,
    pub created_at: String,
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionIdRequest>,
) -> Result<Json<ApiResponse<SessionResponseDto>>, ApiError> {
    let view = state
        .get_session_handler
        .handle(GetSession {
            session_id: req.session_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(SessionResponseDto {
        session_id: view.session_id,
        story: view.story,
        has_voice_input: view.has_voice_input,
        created_at: view.created_at,
    })))
}

// ============================================================================
// Close Session
// ============================================================================

pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionIdRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .close_session_handler
        .handle(CloseSessionCommand {
            session_id: req.session_id,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
