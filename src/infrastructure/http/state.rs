//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloseSessionHandler, CreateSessionHandler, GenerateStoryHandler, SpeakStoryHandler,
    SubmitVoiceInputHandler, TakeVoiceInputHandler,
    // Query handlers
    GetSessionHandler,
    // Ports
    SessionManagerPort, SpeechSynthesizerPort, StoryGeneratorPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub session_manager: Arc<dyn SessionManagerPort>,

    // ========== Command Handlers ==========
    pub create_session_handler: CreateSessionHandler,
    pub close_session_handler: CloseSessionHandler,
    pub generate_story_handler: GenerateStoryHandler,
    pub speak_story_handler: SpeakStoryHandler,
    pub submit_voice_input_handler: SubmitVoiceInputHandler,
    pub take_voice_input_handler: TakeVoiceInputHandler,

    // ========== Query Handlers ==========
    pub get_session_handler: GetSessionHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        story_generator: Arc<dyn StoryGeneratorPort>,
        speech_synthesizer: Arc<dyn SpeechSynthesizerPort>,
    ) -> Self {
        Self {
            session_manager: session_manager.clone(),

            // Command handlers
            create_session_handler: CreateSessionHandler::new(session_manager.clone()),
            close_session_handler: CloseSessionHandler::new(session_manager.clone()),
            generate_story_handler: GenerateStoryHandler::new(
                session_manager.clone(),
                story_generator,
            ),
            speak_story_handler: SpeakStoryHandler::new(
                session_manager.clone(),
                speech_synthesizer,
            ),
            submit_voice_input_handler: SubmitVoiceInputHandler::new(session_manager.clone()),
            take_voice_input_handler: TakeVoiceInputHandler::new(session_manager.clone()),

            // Query handlers
            get_session_handler: GetSessionHandler::new(session_manager),
        }
    }
}
