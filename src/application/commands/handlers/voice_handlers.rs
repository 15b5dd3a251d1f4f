//! Voice Input Command Handlers
//!
//! 浏览器语音识别结果作为一次性消息挂在会话上：提交时覆盖，读取时清空

use std::sync::Arc;

use crate::application::commands::{SubmitVoiceInput, TakeVoiceInput};
use crate::application::error::ApplicationError;
use crate::application::ports::{SessionManagerPort, VoiceInput};

/// SubmitVoiceInput Handler
pub struct SubmitVoiceInputHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl SubmitVoiceInputHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(&self, command: SubmitVoiceInput) -> Result<(), ApplicationError> {
        let input = match command.input {
            VoiceInput::Transcript(text) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(ApplicationError::precondition("Voice transcript is empty"));
                }
                VoiceInput::Transcript(text)
            }
            VoiceInput::Error(reason) => {
                tracing::warn!(
                    session_id = %command.session_id,
                    reason = %reason,
                    "Speech recognition failed in browser"
                );
                VoiceInput::Error(reason)
            }
        };

        self.session_manager
            .post_voice_input(&command.session_id, input)?;

        tracing::debug!(session_id = %command.session_id, "Voice input received");
        Ok(())
    }
}

/// TakeVoiceInput Handler
pub struct TakeVoiceInputHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl TakeVoiceInputHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        command: TakeVoiceInput,
    ) -> Result<Option<VoiceInput>, ApplicationError> {
        Ok(self.session_manager.take_voice_input(&command.session_id)?)
    }
}
