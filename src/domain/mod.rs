//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Story Context: 故事参数、Prompt 组装
//! - Audio Context: PCM 参数与可播放音频

pub mod audio;
pub mod story;
