//! 测试用的端口替身

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{
    AudioTranscoderPort, GenerationError, SpeechSynthesizerPort, StoryGeneratorPort,
    SynthesisError,
};
use crate::domain::audio::{PcmSpec, PlayableAudio};
use crate::domain::story::{ApiKey, StoryPrompt, StoryText};
use crate::infrastructure::adapters::WavTranscoder;

type GenerateFn = Box<dyn Fn() -> Result<StoryText, GenerationError> + Send + Sync>;
type SynthesizeFn = Box<dyn Fn() -> Result<PlayableAudio, SynthesisError> + Send + Sync>;

/// 固定返回结果的故事生成器，记录收到的 Prompt
pub struct FakeStoryGenerator {
    reply: GenerateFn,
    prompts: Mutex<Vec<String>>,
}

impl FakeStoryGenerator {
    pub fn replying(story: &'static str) -> Self {
        Self {
            reply: Box::new(move || Ok(StoryText::new(story).expect("non-empty story"))),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: fn() -> GenerationError) -> Self {
        Self {
            reply: Box::new(move || Err(error())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryGeneratorPort for FakeStoryGenerator {
    async fn generate(
        &self,
        prompt: &StoryPrompt,
        _api_key: &ApiKey,
    ) -> Result<StoryText, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.reply)()
    }
}

/// 固定返回静音 WAV 的语音合成器
pub struct FakeSpeechSynthesizer {
    reply: SynthesizeFn,
    calls: AtomicUsize,
}

impl FakeSpeechSynthesizer {
    pub fn silent(sample_rate: u32, pcm_len: usize) -> Self {
        Self {
            reply: Box::new(move || {
                WavTranscoder::new()
                    .to_container(&vec![0u8; pcm_len], PcmSpec::mono_16bit(sample_rate))
                    .map_err(SynthesisError::from)
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: fn() -> SynthesisError) -> Self {
        Self {
            reply: Box::new(move || Err(error())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeSpeechSynthesizer {
    async fn synthesize(
        &self,
        _text: &StoryText,
        _api_key: &ApiKey,
    ) -> Result<PlayableAudio, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)()
    }
}
