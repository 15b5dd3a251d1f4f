//! Story Command Handlers
//!
//! 生成与朗读两个用例。前置条件（API Key、角色、会话、已有故事）全部在发起网络请求前校验。

use std::sync::Arc;

use crate::application::commands::{
    GenerateStory, GenerateStoryResponse, SpeakStory, SpeakStoryResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{SessionManagerPort, SpeechSynthesizerPort, StoryGeneratorPort};
use crate::domain::story::{assemble, ApiKey, StoryRequest};

// ============================================================================
// GenerateStory
// ============================================================================

/// GenerateStory Handler
pub struct GenerateStoryHandler {
    session_manager: Arc<dyn SessionManagerPort>,
    story_generator: Arc<dyn StoryGeneratorPort>,
}

impl GenerateStoryHandler {
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        story_generator: Arc<dyn StoryGeneratorPort>,
    ) -> Self {
        Self {
            session_manager,
            story_generator,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateStory,
    ) -> Result<GenerateStoryResponse, ApplicationError> {
        let api_key = ApiKey::new(command.api_key)?;
        let request = StoryRequest::new(
            command.characters,
            command.genre,
            command.age_group,
            command.tips,
        )?;

        if !self.session_manager.is_valid(&command.session_id) {
            return Err(ApplicationError::not_found("Session", command.session_id));
        }

        let prompt = assemble(&request);

        tracing::info!(
            session_id = %command.session_id,
            genre = %request.genre,
            age_group = %request.age_group,
            has_tips = request.effective_tips().is_some(),
            prompt_len = prompt.as_str().len(),
            "Weaving a story"
        );

        let story = self.story_generator.generate(&prompt, &api_key).await?;

        // 仅在成功时整体覆盖会话中的故事
        self.session_manager
            .store_story(&command.session_id, story.clone())?;

        tracing::info!(
            session_id = %command.session_id,
            story_len = story.as_str().len(),
            "Story generated"
        );

        Ok(GenerateStoryResponse { story })
    }
}

// ============================================================================
// SpeakStory
// ============================================================================

/// SpeakStory Handler
pub struct SpeakStoryHandler {
    session_manager: Arc<dyn SessionManagerPort>,
    speech_synthesizer: Arc<dyn SpeechSynthesizerPort>,
}

impl SpeakStoryHandler {
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        speech_synthesizer: Arc<dyn SpeechSynthesizerPort>,
    ) -> Self {
        Self {
            session_manager,
            speech_synthesizer,
        }
    }

    pub async fn handle(&self, command: SpeakStory) -> Result<SpeakStoryResponse, ApplicationError> {
        let api_key = ApiKey::new(command.api_key)?;

        let session = self.session_manager.get(&command.session_id)?;
        let story = session.story.ok_or_else(|| {
            ApplicationError::precondition("No story to tell yet, generate one first")
        })?;

        tracing::info!(
            session_id = %command.session_id,
            story_len = story.as_str().len(),
            "Generating soothing audio"
        );

        let audio = self.speech_synthesizer.synthesize(&story, &api_key).await?;

        tracing::info!(
            session_id = %command.session_id,
            sample_rate = audio.spec.sample_rate,
            duration_ms = audio.duration_ms,
            audio_size = audio.len(),
            "Story audio ready"
        );

        Ok(SpeakStoryResponse { audio })
    }
}
