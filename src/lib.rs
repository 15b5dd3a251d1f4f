//! Story Weaver - 睡前故事生成与朗读服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Context: 故事请求、Prompt 组装、故事正文
//! - Audio Context: PCM 参数与可播放音频
//!
//! 应用层 (application/):
//! - Ports: StoryGenerator, SpeechSynthesizer, AudioTranscoder, SessionManager
//! - Commands: 会话、故事生成与朗读、语音输入
//! - Queries: 会话查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON API + 静态页面
//! - Memory: SessionManager 内存实现
//! - Adapters: Gemini 文本/语音客户端、WAV 转码器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{load_config, AppConfig};
