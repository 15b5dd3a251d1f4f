//! Audio Transcoder Port - 音频封装抽象
//!
//! 将原始 PCM 封装为可播放的容器格式

use thiserror::Error;

use crate::domain::audio::{PcmSpec, PlayableAudio};

/// 转码错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscodeError {
    /// 采样率、声道数或位深度不是正数，或数据长度超出容器上限
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Audio Transcoder Port
///
/// 纯函数语义：相同输入得到逐字节相同的输出
pub trait AudioTranscoderPort: Send + Sync {
    /// 将 PCM 数据封装为容器音频，PCM 原样写入，不重采样
    fn to_container(&self, pcm: &[u8], spec: PcmSpec) -> Result<PlayableAudio, TranscodeError>;

    /// 容器 header 的固定长度
    fn header_len(&self) -> usize;
}
