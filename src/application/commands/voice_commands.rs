//! Voice Input Commands - 语音输入一次性消息

use crate::application::ports::VoiceInput;

/// 提交浏览器语音识别结果
#[derive(Debug, Clone)]
pub struct SubmitVoiceInput {
    pub session_id: String,
    pub input: VoiceInput,
}

/// 取出并清空语音识别结果
#[derive(Debug, Clone)]
pub struct TakeVoiceInput {
    pub session_id: String,
}
