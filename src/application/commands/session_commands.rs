//! Session Commands - 会话相关命令

/// 创建会话命令
#[derive(Debug, Clone, Default)]
pub struct CreateSessionCommand;

/// 创建会话响应
#[derive(Debug, Clone)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// 关闭会话命令
#[derive(Debug, Clone)]
pub struct CloseSessionCommand {
    pub session_id: String,
}
