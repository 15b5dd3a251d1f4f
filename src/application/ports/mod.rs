//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_transcoder;
mod session_manager;
mod speech_synthesizer;
mod story_generator;

pub use audio_transcoder::{AudioTranscoderPort, TranscodeError};
pub use session_manager::{SessionError, SessionManagerPort, StorySession, VoiceInput};
pub use speech_synthesizer::{SpeechSynthesizerPort, SynthesisError};
pub use story_generator::{GenerationError, StoryGeneratorPort};
