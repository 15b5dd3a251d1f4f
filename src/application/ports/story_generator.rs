//! Story Generator Port - 文本生成服务抽象
//!
//! 定义故事生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::story::{ApiKey, StoryPrompt, StoryText};

/// 故事生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 网络错误、超时或非 2xx 状态码
    #[error("Transport error: {0}")]
    Transport(String),

    /// 响应为 JSON 但缺少或错误的字段
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Story Generator Port
///
/// 每次调用只发送一次请求，不做重试
#[async_trait]
pub trait StoryGeneratorPort: Send + Sync {
    /// 根据 Prompt 生成故事正文
    async fn generate(
        &self,
        prompt: &StoryPrompt,
        api_key: &ApiKey,
    ) -> Result<StoryText, GenerationError>;
}
