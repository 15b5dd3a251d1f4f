//! Story Handlers
//!
//! 生成故事返回 JSON；朗读直接返回 audio/wav 字节流，参数放在响应头里。

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{ApplicationError, GenerateStory, SpeakStory};
use crate::domain::audio::PlayableAudio;
use crate::domain::story::{AgeGroup, Genre};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 音频时长响应头
pub const AUDIO_DURATION_HEADER: &str = "X-Audio-Duration-Ms";
/// 采样率响应头
pub const AUDIO_SAMPLE_RATE_HEADER: &str = "X-Audio-Sample-Rate";

// ============================================================================
// Generate
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateStoryRequest {
    pub session_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub characters: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub tips: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateStoryResponseDto {
    pub story: String,
}

pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateStoryRequest>,
) -> Result<Json<ApiResponse<GenerateStoryResponseDto>>, ApiError> {
    let genre: Genre = req.genre.parse().map_err(ApplicationError::from)?;
    let age_group: AgeGroup = req.age_group.parse().map_err(ApplicationError::from)?;

    let cmd = GenerateStory {
        session_id: req.session_id,
        api_key: req.api_key,
        characters: req.characters,
        genre,
        age_group,
        tips: req.tips,
    };

    let result = state.generate_story_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(GenerateStoryResponseDto {
        story: result.story.into_inner(),
    })))
}

// ============================================================================
// Speak
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SpeakStoryRequest {
    pub session_id: String,
    #[serde(default)]
    pub api_key: String,
}

pub async fn speak_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeakStoryRequest>,
) -> Result<Response, ApiError> {
    let cmd = SpeakStory {
        session_id: req.session_id,
        api_key: req.api_key,
    };

    let result = state.speak_story_handler.handle(cmd).await?;

    audio_response(result.audio)
}

fn audio_response(audio: PlayableAudio) -> Result<Response, ApiError> {
    let duration = HeaderValue::from(audio.duration_ms);
    let sample_rate = HeaderValue::from(audio.spec.sample_rate);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PlayableAudio::CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, audio.len())
        .header(AUDIO_DURATION_HEADER, duration)
        .header(AUDIO_SAMPLE_RATE_HEADER, sample_rate)
        .body(Body::from(audio.data))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}
