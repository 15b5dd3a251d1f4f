//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有会修改会话状态的操作

mod session_commands;
mod story_commands;
mod voice_commands;

pub mod handlers;

pub use session_commands::*;
pub use story_commands::*;
pub use voice_commands::*;
