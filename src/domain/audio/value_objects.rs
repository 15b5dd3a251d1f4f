//! Audio Context - Value Objects

use serde::{Deserialize, Serialize};

/// 原始 PCM 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmSpec {
    /// 采样率（Hz）
    pub sample_rate: u32,
    /// 声道数
    pub channels: u16,
    /// 位深度
    pub bits_per_sample: u16,
}

impl PcmSpec {
    /// TTS 服务输出的单声道 16 位 PCM
    pub fn mono_16bit(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: 16,
        }
    }

    /// 每个采样占用的字节数，不足 8 位的部分按整字节计
    pub fn bytes_per_sample(&self) -> u32 {
        u32::from(self.bits_per_sample).div_ceil(8)
    }

    /// 每个采样帧的字节数
    pub fn block_align(&self) -> u32 {
        u32::from(self.channels) * self.bytes_per_sample()
    }
}

/// 可直接交给播放器的容器音频（WAV）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableAudio {
    /// 完整容器字节（header + PCM）
    pub data: Vec<u8>,
    pub spec: PcmSpec,
    /// 时长（毫秒）
    pub duration_ms: u64,
}

impl PlayableAudio {
    pub const CONTENT_TYPE: &'static str = "audio/wav";

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_align_rounds_up_to_whole_bytes() {
        let spec = |bits| PcmSpec {
            sample_rate: 8000,
            channels: 2,
            bits_per_sample: bits,
        };
        assert_eq!(spec(4).block_align(), 2);
        assert_eq!(spec(8).block_align(), 2);
        assert_eq!(spec(12).block_align(), 4);
        assert_eq!(spec(16).block_align(), 4);
        assert_eq!(spec(24).block_align(), 6);
    }
}
