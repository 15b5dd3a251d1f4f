//! Prompt 组装
//!
//! 将结构化的表单输入转换为发送给文本生成服务的单个 Prompt。
//! 字段顺序固定，附加提示为空时整行省略，保证相同输入得到相同 Prompt。

use std::fmt::Write;

use super::{StoryPrompt, StoryRequest};

/// Prompt 首行
pub const PROMPT_INTRO: &str = "Create a story for the following details:";

/// 组装 Prompt
pub fn assemble(request: &StoryRequest) -> StoryPrompt {
    let mut prompt = String::with_capacity(160);
    prompt.push_str(PROMPT_INTRO);
    prompt.push_str("\n\n");

    // 写入 String 不会失败
    let _ = writeln!(prompt, "Characters: {}", request.characters.as_str());
    let _ = writeln!(prompt, "Genre: {}", request.genre.label());
    let _ = writeln!(prompt, "Age Group: {}", request.age_group.label());
    if let Some(tips) = request.effective_tips() {
        let _ = writeln!(prompt, "Additional Tips: {}", tips);
    }

    StoryPrompt::new(prompt)
}
