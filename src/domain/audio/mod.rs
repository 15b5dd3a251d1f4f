//! Audio Context - 音频值对象
//!
//! PCM 参数描述与可播放的容器音频

mod value_objects;

pub use value_objects::{PcmSpec, PlayableAudio};
