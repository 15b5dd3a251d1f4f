//! Story Context - 睡前故事限界上下文
//!
//! 职责:
//! - 故事请求参数校验（角色、类型、年龄段、附加提示）
//! - Prompt 组装
//! - 故事文本与调用凭证值对象

mod errors;
mod prompt;
mod value_objects;

pub use errors::StoryError;
pub use prompt::{assemble, PROMPT_INTRO};
pub use value_objects::{AgeGroup, ApiKey, Characters, Genre, StoryPrompt, StoryRequest, StoryText};
