//! Gemini Story Client - 故事文本生成
//!
//! 实现 StoryGeneratorPort：Prompt 作为用户内容，讲故事人的设定作为 systemInstruction。

use async_trait::async_trait;

use super::client::{CallError, GeminiClient};
use super::schema::{Content, GenerateContentRequest};
use crate::application::ports::{GenerationError, StoryGeneratorPort};
use crate::domain::story::{ApiKey, StoryPrompt, StoryText};

/// 默认文本模型
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// 讲故事人设定
pub const SYSTEM_PROMPT: &str = "You are a gentle and soothing storyteller, specializing in creating calming and imaginative bedtime stories for children. The stories should be a few paragraphs long and have a happy, reassuring ending.";

impl From<CallError> for GenerationError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Transport(msg) => GenerationError::Transport(msg),
            CallError::Malformed(msg) => GenerationError::MalformedResponse(msg),
        }
    }
}

/// Gemini 文本生成客户端
pub struct GeminiStoryClient {
    gemini: GeminiClient,
    model: String,
}

impl GeminiStoryClient {
    pub fn new(gemini: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            gemini,
            model: model.into(),
        }
    }
}

#[async_trait]
impl StoryGeneratorPort for GeminiStoryClient {
    async fn generate(
        &self,
        prompt: &StoryPrompt,
        api_key: &ApiKey,
    ) -> Result<StoryText, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt.as_str())],
            system_instruction: Some(Content::text(SYSTEM_PROMPT)),
            generation_config: None,
        };

        let response = self
            .gemini
            .generate_content(&self.model, api_key, &request)
            .await?;

        let text = response
            .first_text()
            .map_err(GenerationError::MalformedResponse)?;
        let story = StoryText::new(text).map_err(|_| {
            GenerationError::MalformedResponse("model returned an empty story".to_string())
        })?;

        tracing::debug!(model = %self.model, story_len = story.as_str().len(), "Story text received");

        Ok(story)
    }
}
