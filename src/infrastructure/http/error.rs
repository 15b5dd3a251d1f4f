//! HTTP Error Handling
//!
//! 所有错误都以 HTTP 200 + `{errno, error, data}` 信封返回，并在这里统一记录一次日志。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ports::{GenerationError, SynthesisError};
use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const BAD_GATEWAY: i32 = 502;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
    /// 上游返回了无法理解的内容
    BadGateway(String),
    /// 上游不可达、超时或拒绝请求
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn errno(&self) -> i32 {
        match self {
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::NotFound(_) => errno::NOT_FOUND,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::BadGateway(_) => errno::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errno = self.errno();
        let msg = self.message();

        match &self {
            ApiError::BadRequest(_) => {
                tracing::warn!(errno = errno, error = %msg, "Bad request");
            }
            ApiError::NotFound(_) => {
                tracing::warn!(errno = errno, error = %msg, "Resource not found");
            }
            ApiError::Internal(_) => {
                tracing::error!(errno = errno, error = %msg, "Internal server error");
            }
            ApiError::BadGateway(_) => {
                tracing::error!(errno = errno, error = %msg, "Upstream returned an unusable response");
            }
            ApiError::ServiceUnavailable(_) => {
                tracing::error!(errno = errno, error = %msg, "Upstream service unavailable");
            }
        }

        let response = ErrorResponse::new(errno, msg);
        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        let msg = e.to_string();
        match e {
            ApplicationError::Precondition(_) => ApiError::BadRequest(msg),
            ApplicationError::NotFound { .. } => ApiError::NotFound(msg),
            ApplicationError::Generation(GenerationError::Transport(_)) => {
                ApiError::ServiceUnavailable(msg)
            }
            ApplicationError::Generation(GenerationError::MalformedResponse(_)) => {
                ApiError::BadGateway(msg)
            }
            ApplicationError::Synthesis(SynthesisError::Transport(_)) => {
                ApiError::ServiceUnavailable(msg)
            }
            ApplicationError::Synthesis(
                SynthesisError::MalformedResponse(_) | SynthesisError::DecodeError(_),
            ) => ApiError::BadGateway(msg),
            ApplicationError::Synthesis(SynthesisError::InvalidParameter(_)) => {
                ApiError::Internal(msg)
            }
            ApplicationError::InternalError(_) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_mapping() {
        let cases = [
            (ApplicationError::precondition("Please enter your Gemini API key"), 400),
            (ApplicationError::not_found("Session", "abc"), 404),
            (
                GenerationError::Transport("HTTP 500".into()).into(),
                errno::SERVICE_UNAVAILABLE,
            ),
            (
                GenerationError::MalformedResponse("no candidates".into()).into(),
                errno::BAD_GATEWAY,
            ),
            (
                SynthesisError::DecodeError("bad base64".into()).into(),
                errno::BAD_GATEWAY,
            ),
            (
                SynthesisError::InvalidParameter("rate".into()).into(),
                errno::INTERNAL_ERROR,
            ),
        ];

        for (app_err, expected) in cases {
            assert_eq!(ApiError::from(app_err).errno(), expected);
        }
    }

    #[test]
    fn test_precondition_message_passes_through() {
        let err = ApiError::from(ApplicationError::precondition(
            "Please enter at least one character to get started",
        ));
        assert_eq!(
            err.message(),
            "Please enter at least one character to get started"
        );
    }

    #[tokio::test]
    async fn test_error_envelope_uses_http_200() {
        let response = ApiError::NotFound("Session not found: abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errno"], 404);
        assert_eq!(json["error"], "Session not found: abc");
        assert!(json["data"].is_null());
    }
}
