//! Session Queries - 会话查询定义

/// 获取会话当前状态（用于页面重新渲染）
#[derive(Debug, Clone)]
pub struct GetSession {
    pub session_id: String,
}
