//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（StoryGenerator、SpeechSynthesizer、AudioTranscoder、SessionManager）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Session commands
    CloseSessionCommand,
    CreateSessionCommand,
    CreateSessionResponse,
    // Story commands
    GenerateStory,
    GenerateStoryResponse,
    SpeakStory,
    SpeakStoryResponse,
    // Voice input commands
    SubmitVoiceInput,
    TakeVoiceInput,
    // Handlers
    handlers::{
        CloseSessionHandler, CreateSessionHandler, GenerateStoryHandler, SpeakStoryHandler,
        SubmitVoiceInputHandler, TakeVoiceInputHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Audio transcoder
    AudioTranscoderPort,
    TranscodeError,
    // Session manager
    SessionError,
    SessionManagerPort,
    StorySession,
    VoiceInput,
    // Speech synthesizer
    SpeechSynthesizerPort,
    SynthesisError,
    // Story generator
    GenerationError,
    StoryGeneratorPort,
};

pub use queries::{
    GetSession,
    handlers::{GetSessionHandler, SessionView},
};
