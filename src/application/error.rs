//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{GenerationError, SessionError, SynthesisError};
use crate::domain::story::StoryError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 前置条件不满足（缺少 API Key、角色为空、尚未生成故事等），不会发起网络请求
    #[error("{0}")]
    Precondition(String),

    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 故事生成失败
    #[error("Error generating story: {0}")]
    Generation(#[from] GenerationError),

    /// 语音合成失败
    #[error("Error generating audio: {0}")]
    Synthesis(#[from] SynthesisError),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建前置条件错误
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<StoryError> for ApplicationError {
    fn from(err: StoryError) -> Self {
        Self::Precondition(err.to_string())
    }
}

impl From<SessionError> for ApplicationError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => Self::not_found("Session", id),
            SessionError::AlreadyExists(id) => {
                Self::internal(format!("Session already exists: {}", id))
            }
        }
    }
}
