//! HTTP Handlers

mod ping;
mod session;
mod story;
mod voice;

pub use ping::*;
pub use session::*;
pub use story::*;
pub use voice::*;
