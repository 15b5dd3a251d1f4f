//! Voice Input Handlers
//!
//! 浏览器端 SpeechRecognition 的结果经 submit 写入会话，页面再用 take 取回。

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{SubmitVoiceInput, TakeVoiceInput, VoiceInput};
use crate::infrastructure::http::dto::{ApiResponse, Empty, SessionIdRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Submit
// ============================================================================

/// `transcript` 与 `error` 二选一，同时出现时以 `error` 为准
#[derive(Debug, Deserialize)]
pub struct SubmitVoiceRequest {
    pub session_id: String,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub async fn submit_voice_input(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitVoiceRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let input = match (req.error, req.transcript) {
        (Some(error), _) => VoiceInput::Error(error),
        (None, Some(transcript)) => VoiceInput::Transcript(transcript),
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Either transcript or error is required".to_string(),
            ))
        }
    };

    state
        .submit_voice_input_handler
        .handle(SubmitVoiceInput {
            session_id: req.session_id,
            input,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

// ============================================================================
// Take
// ============================================================================

#[derive(Debug, Default, Serialize)]
pub struct VoiceInputDto {
    pub transcript: Option<String>,
    pub error: Option<String>,
}

pub async fn take_voice_input(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionIdRequest>,
) -> Result<Json<ApiResponse<VoiceInputDto>>, ApiError> {
    let input = state
        .take_voice_input_handler
        .handle(TakeVoiceInput {
            session_id: req.session_id,
        })
        .await?;

    let dto = match input {
        Some(VoiceInput::Transcript(text)) => VoiceInputDto {
            transcript: Some(text),
            error: None,
        },
        Some(VoiceInput::Error(reason)) => VoiceInputDto {
            transcript: None,
            error: Some(format!("Speech recognition error: {}", reason)),
        },
        None => VoiceInputDto::default(),
    };

    Ok(Json(ApiResponse::success(dto)))
}
