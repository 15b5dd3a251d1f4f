//! Speech Synthesizer Port - 语音合成服务抽象

use async_trait::async_trait;
use thiserror::Error;

use super::TranscodeError;
use crate::domain::audio::PlayableAudio;
use crate::domain::story::{ApiKey, StoryText};

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// base64 载荷解码失败
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// 转码参数无效
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<TranscodeError> for SynthesisError {
    fn from(err: TranscodeError) -> Self {
        match err {
            TranscodeError::InvalidParameter(msg) => SynthesisError::InvalidParameter(msg),
        }
    }
}

/// Speech Synthesizer Port
///
/// 将故事正文合成为可播放音频，每次调用都重新合成，不缓存
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    async fn synthesize(
        &self,
        text: &StoryText,
        api_key: &ApiKey,
    ) -> Result<PlayableAudio, SynthesisError>;
}
