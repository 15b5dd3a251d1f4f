//! Story Commands - 故事生成与朗读命令

use crate::domain::audio::PlayableAudio;
use crate::domain::story::{AgeGroup, Genre, StoryText};

/// 生成故事命令
///
/// `api_key` 只用于本次调用，不写入会话
#[derive(Debug, Clone)]
pub struct GenerateStory {
    pub session_id: String,
    pub api_key: String,
    pub characters: String,
    pub genre: Genre,
    pub age_group: AgeGroup,
    pub tips: Option<String>,
}

/// 生成故事响应
#[derive(Debug, Clone)]
pub struct GenerateStoryResponse {
    pub story: StoryText,
}

/// 朗读当前故事命令
#[derive(Debug, Clone)]
pub struct SpeakStory {
    pub session_id: String,
    pub api_key: String,
}

/// 朗读响应
#[derive(Debug, Clone)]
pub struct SpeakStoryResponse {
    pub audio: PlayableAudio,
}
