//! Gemini Speech Client - 故事朗读
//!
//! 实现 SpeechSynthesizerPort：
//! 1. 请求 TTS 模型输出 AUDIO（固定音色）
//! 2. 从 mimeType `audio/L16;rate=<n>` 中取采样率
//! 3. base64 解码 PCM，交给转码器封装为 WAV

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use std::sync::Arc;

use super::client::{CallError, GeminiClient};
use super::schema::{Content, GenerateContentRequest, GenerationConfig};
use crate::application::ports::{AudioTranscoderPort, SpeechSynthesizerPort, SynthesisError};
use crate::domain::audio::{PcmSpec, PlayableAudio};
use crate::domain::story::{ApiKey, StoryText};

/// 默认 TTS 模型
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// 预置音色
pub const VOICE_NAME: &str = "Puck";

impl From<CallError> for SynthesisError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Transport(msg) => SynthesisError::Transport(msg),
            CallError::Malformed(msg) => SynthesisError::MalformedResponse(msg),
        }
    }
}

/// 从编码描述中解析采样率
///
/// 取 `rate=` 之后、下一个 `;` 之前的整数。缺失、非数字或为 0 都视为响应格式错误。
pub fn sample_rate_from_mime(mime_type: &str) -> Result<u32, SynthesisError> {
    let (_, rest) = mime_type.split_once("rate=").ok_or_else(|| {
        SynthesisError::MalformedResponse(format!("mimeType has no sample rate: {}", mime_type))
    })?;
    let value = rest.split(';').next().unwrap_or_default().trim();

    match value.parse::<u32>() {
        Ok(rate) if rate > 0 => Ok(rate),
        _ => Err(SynthesisError::MalformedResponse(format!(
            "invalid sample rate '{}' in mimeType: {}",
            value, mime_type
        ))),
    }
}

/// Gemini 语音合成客户端
pub struct GeminiSpeechClient {
    gemini: GeminiClient,
    model: String,
    transcoder: Arc<dyn AudioTranscoderPort>,
}

impl GeminiSpeechClient {
    pub fn new(
        gemini: GeminiClient,
        model: impl Into<String>,
        transcoder: Arc<dyn AudioTranscoderPort>,
    ) -> Self {
        Self {
            gemini,
            model: model.into(),
            transcoder,
        }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for GeminiSpeechClient {
    async fn synthesize(
        &self,
        text: &StoryText,
        api_key: &ApiKey,
    ) -> Result<PlayableAudio, SynthesisError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(text.as_str())],
            system_instruction: None,
            generation_config: Some(GenerationConfig::audio_with_voice(VOICE_NAME)),
        };

        let response = self
            .gemini
            .generate_content(&self.model, api_key, &request)
            .await?;

        let payload = response
            .first_inline_audio()
            .map_err(SynthesisError::MalformedResponse)?;
        let sample_rate = sample_rate_from_mime(payload.mime_type)?;

        let pcm = general_purpose::STANDARD
            .decode(payload.data)
            .map_err(|e| SynthesisError::DecodeError(format!("Invalid base64 audio: {}", e)))?;

        tracing::debug!(
            model = %self.model,
            mime_type = %payload.mime_type,
            pcm_size = pcm.len(),
            "Speech audio received"
        );

        let audio = self
            .transcoder
            .to_container(&pcm, PcmSpec::mono_16bit(sample_rate))?;

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::gemini::client::GeminiClientConfig;
    use crate::infrastructure::adapters::gemini::stub::StubServer;
    use crate::infrastructure::adapters::WavTranscoder;

    fn speech_client(stub: &StubServer) -> GeminiSpeechClient {
        let gemini =
            GeminiClient::new(GeminiClientConfig::new(stub.endpoint()).with_timeout(5)).unwrap();
        GeminiSpeechClient::new(gemini, "tts-model", Arc::new(WavTranscoder::new()))
    }

    fn audio_response(data: &str, mime_type: &str) -> String {
        serde_json::json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"data": data, "mimeType": mime_type}}
            ]}}]
        })
        .to_string()
    }

    fn story() -> StoryText {
        StoryText::new("The stars hummed a lullaby.").unwrap()
    }

    fn key() -> ApiKey {
        ApiKey::new("test-key").unwrap()
    }

    #[test]
    fn test_sample_rate_from_mime() {
        assert_eq!(sample_rate_from_mime("audio/L16;rate=24000").unwrap(), 24000);
        assert_eq!(
            sample_rate_from_mime("audio/L16;codec=pcm;rate=16000").unwrap(),
            16000
        );
        assert_eq!(
            sample_rate_from_mime("audio/L16;rate=22050;channels=1").unwrap(),
            22050
        );
    }

    #[test]
    fn test_sample_rate_missing_or_invalid() {
        for mime in [
            "audio/L16",
            "audio/L16;rate=",
            "audio/L16;rate=abc",
            "audio/L16;rate=0",
            "audio/L16;rate=-8000",
        ] {
            assert!(
                matches!(
                    sample_rate_from_mime(mime),
                    Err(SynthesisError::MalformedResponse(_))
                ),
                "{} should be rejected",
                mime
            );
        }
    }

    #[tokio::test]
    async fn test_synthesize_wraps_pcm() {
        let pcm = vec![1u8, 0, 2, 0, 3, 0, 4, 0];
        let encoded = general_purpose::STANDARD.encode(&pcm);
        let stub = StubServer::start(200, audio_response(&encoded, "audio/L16;rate=24000")).await;

        let audio = speech_client(&stub).synthesize(&story(), &key()).await.unwrap();

        assert_eq!(audio.len(), 44 + pcm.len());
        assert_eq!(&audio.data[44..], pcm.as_slice());
        assert_eq!(audio.spec, PcmSpec::mono_16bit(24000));

        let requests = stub.requests();
        assert_eq!(requests[0].path, "/models/tts-model:generateContent");
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], story().as_str());
        assert_eq!(
            body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            VOICE_NAME
        );
        assert_eq!(body["generationConfig"]["responseModalities"][0], "AUDIO");
    }

    #[tokio::test]
    async fn test_invalid_base64_is_decode_error() {
        let stub =
            StubServer::start(200, audio_response("!!not-base64!!", "audio/L16;rate=24000")).await;
        let err = speech_client(&stub).synthesize(&story(), &key()).await.unwrap_err();
        assert!(matches!(err, SynthesisError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_missing_rate_is_malformed() {
        let stub = StubServer::start(200, audio_response("AAAA", "audio/L16")).await;
        let err = speech_client(&stub).synthesize(&story(), &key()).await.unwrap_err();
        assert!(matches!(err, SynthesisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_inline_data_is_malformed() {
        let stub = StubServer::start(
            200,
            r#"{"candidates": [{"content": {"parts": [{"text": "no audio"}]}}]}"#,
        )
        .await;
        let err = speech_client(&stub).synthesize(&story(), &key()).await.unwrap_err();
        assert!(matches!(err, SynthesisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_candidates_is_malformed() {
        for body in ["{}", r#"{"candidates": []}"#] {
            let stub = StubServer::start(200, body).await;
            let err = speech_client(&stub).synthesize(&story(), &key()).await.unwrap_err();
            assert!(
                matches!(err, SynthesisError::MalformedResponse(_)),
                "{} should be malformed, got {:?}",
                body,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_server_error_is_transport() {
        let stub = StubServer::start(500, "internal error").await;
        let err = speech_client(&stub).synthesize(&story(), &key()).await.unwrap_err();
        assert!(matches!(err, SynthesisError::Transport(_)));
    }
}
