//! Gemini 适配器
//!
//! - `GeminiStoryClient`: 文本生成（StoryGeneratorPort）
//! - `GeminiSpeechClient`: 语音合成（SpeechSynthesizerPort）

mod client;
mod schema;
mod speech_client;
mod story_client;

pub use client::{CallError, GeminiClient, GeminiClientConfig, DEFAULT_ENDPOINT};
pub use speech_client::{sample_rate_from_mime, GeminiSpeechClient, DEFAULT_TTS_MODEL, VOICE_NAME};
pub use story_client::{GeminiStoryClient, DEFAULT_TEXT_MODEL, SYSTEM_PROMPT};
