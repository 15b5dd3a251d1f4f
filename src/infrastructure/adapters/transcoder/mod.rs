//! Transcoder Adapter - PCM 容器封装实现

mod wav_transcoder;

pub use wav_transcoder::{WavTranscoder, WAV_HEADER_LEN};
