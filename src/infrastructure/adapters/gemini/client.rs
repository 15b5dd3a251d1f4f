//! Gemini Client - generateContent 调用
//!
//! 文本与语音两个适配器共用一个 reqwest Client。
//! API Key 作为 `key` 查询参数传递，不写入日志。
//!
//! POST {endpoint}/{model}:generateContent?key=...
//! Request/Response: JSON，见 schema.rs

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use super::schema::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::domain::story::ApiKey;

/// 默认 API 地址
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// 一次 generateContent 调用的失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// 网络错误、超时、非 2xx 状态码
    #[error("Transport error: {0}")]
    Transport(String),
    /// 响应体不是预期的 JSON
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// 模型列表的基础 URL
    pub endpoint: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 120,
        }
    }
}

impl GeminiClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Gemini HTTP 客户端
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self, CallError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CallError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// 生成 URL（不含 key）
    fn generate_url(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.endpoint, model)
    }

    /// 发送一次 generateContent 请求
    pub async fn generate_content(
        &self,
        model: &str,
        api_key: &ApiKey,
        body: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, CallError> {
        let url = self.generate_url(model);

        tracing::debug!(url = %url, model = %model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.expose())])
            .json(body)
            .send()
            .await
            .map_err(|e| {
                // reqwest 的错误信息里带完整 URL，先去掉 key
                let e = e.without_url();
                if e.is_timeout() {
                    CallError::Transport(format!("Request to Gemini timed out: {}", e))
                } else if e.is_connect() {
                    CallError::Transport(format!("Cannot connect to Gemini: {}", e))
                } else {
                    CallError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CallError::Transport(format!("Failed to read response: {}", e.without_url())))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|envelope| envelope.error.summary())
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).trim().to_string());

            tracing::warn!(model = %model, status = %status, detail = %detail, "Gemini returned an error");

            return Err(CallError::Transport(format!("HTTP {}: {}", status, detail)));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| CallError::Malformed(format!("Response is not valid JSON: {}", e)))
    }
}
