//! generateContent 请求/响应结构
//!
//! 响应中的每一层都是可选字段：缺失的 key、空数组和越界下标
//! 在提取阶段统一变成一条描述性的错误信息。

use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: Vec<TextPart<'a>>,
}

impl<'a> Content<'a> {
    /// 只含一个文本 part 的内容
    pub fn text(text: &'a str) -> Self {
        Self {
            parts: vec![TextPart { text }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TextPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig<'a> {
    pub response_modalities: Vec<&'a str>,
    pub speech_config: SpeechConfig<'a>,
}

impl<'a> GenerationConfig<'a> {
    /// 只要音频输出，使用预置音色
    pub fn audio_with_voice(voice_name: &'a str) -> Self {
        Self {
            response_modalities: vec!["AUDIO"],
            speech_config: SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig { voice_name },
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig<'a> {
    pub voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig<'a> {
    pub prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig<'a> {
    pub voice_name: &'a str,
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub data: Option<String>,
    pub mime_type: Option<String>,
}

/// 内联音频载荷（尚未解码）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAudioPayload<'a> {
    pub data: &'a str,
    pub mime_type: &'a str,
}

impl GenerateContentResponse {
    fn candidates(&self) -> Result<&[Candidate], String> {
        let candidates = self
            .candidates
            .as_deref()
            .ok_or_else(|| "response has no 'candidates' field".to_string())?;
        if candidates.is_empty() {
            return Err("response contains no candidates".to_string());
        }
        Ok(candidates)
    }

    /// 第一个带文本的 part
    pub fn first_text(&self) -> Result<&str, String> {
        let candidates = self.candidates()?;

        let text = candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .filter_map(|content| content.parts.as_deref())
            .flatten()
            .find_map(|part| part.text.as_deref());

        text.ok_or_else(|| {
            let reasons: Vec<&str> = candidates
                .iter()
                .filter_map(|c| c.finish_reason.as_deref())
                .collect();
            if reasons.is_empty() {
                "no candidate contains a text part".to_string()
            } else {
                format!(
                    "no candidate contains a text part (finishReason: {})",
                    reasons.join(", ")
                )
            }
        })
    }

    /// candidates[0].content.parts[0].inlineData
    pub fn first_inline_audio(&self) -> Result<RawAudioPayload<'_>, String> {
        let candidate = &self.candidates()?[0];

        let parts = candidate
            .content
            .as_ref()
            .and_then(|content| content.parts.as_deref())
            .ok_or_else(|| match candidate.finish_reason.as_deref() {
                Some(reason) => format!("candidate has no content (finishReason: {})", reason),
                None => "candidate has no content".to_string(),
            })?;
        let part = parts
            .first()
            .ok_or_else(|| "candidate content has no parts".to_string())?;
        let inline = part
            .inline_data
            .as_ref()
            .ok_or_else(|| "first part has no 'inlineData'".to_string())?;

        let data = inline
            .data
            .as_deref()
            .ok_or_else(|| "inlineData has no 'data'".to_string())?;
        let mime_type = inline
            .mime_type
            .as_deref()
            .ok_or_else(|| "inlineData has no 'mimeType'".to_string())?;

        Ok(RawAudioPayload { data, mime_type })
    }
}

/// 服务端错误响应 `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub status: Option<String>,
}

impl ErrorDetail {
    pub fn summary(&self) -> String {
        let message = self.message.as_deref().unwrap_or("unknown error");
        match (&self.status, self.code) {
            (Some(status), _) => format!("{}: {}", status, message),
            (None, Some(code)) => format!("{}: {}", code, message),
            (None, None) => message.to_string(),
        }
    }
}
