//! Session Manager Port - 故事会话生命周期管理
//!
//! 定义会话管理的抽象接口，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::story::StoryText;

/// Session Manager 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),
}

/// 浏览器语音识别回传的一次性消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum VoiceInput {
    /// 识别出的文本
    Transcript(String),
    /// 识别失败（浏览器上报的错误码或描述）
    Error(String),
}

/// 会话状态（in-memory）
///
/// API Key 不在会话中保存
#[derive(Debug, Clone)]
pub struct StorySession {
    pub id: String,
    /// 最近一次成功生成的故事，下次成功生成时整体覆盖
    pub story: Option<StoryText>,
    /// 尚未读取的语音输入，读取一次后清空
    pub voice_input: Option<VoiceInput>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl StorySession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            story: None,
            voice_input: None,
            created_at: now,
            last_activity: now,
        }
    }
}

impl Default for StorySession {
    fn default() -> Self {
        Self::new()
    }
}

/// Session Manager Port
///
/// 管理故事会话的生命周期，所有状态存储在内存中
pub trait SessionManagerPort: Send + Sync {
    /// 创建新会话
    fn create(&self, session: StorySession) -> Result<String, SessionError>;

    /// 获取会话快照
    fn get(&self, id: &str) -> Result<StorySession, SessionError>;

    /// 检查会话是否存在
    fn is_valid(&self, id: &str) -> bool;

    /// 覆盖当前故事
    fn store_story(&self, id: &str, story: StoryText) -> Result<(), SessionError>;

    /// 写入语音输入（覆盖尚未读取的旧消息）
    fn post_voice_input(&self, id: &str, input: VoiceInput) -> Result<(), SessionError>;

    /// 取出并清空语音输入
    fn take_voice_input(&self, id: &str) -> Result<Option<VoiceInput>, SessionError>;

    /// 关闭会话
    fn close(&self, id: &str) -> Result<(), SessionError>;

    /// 获取所有空闲超时的会话 ID
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;
}
