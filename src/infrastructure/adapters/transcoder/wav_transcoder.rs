//! WAV Transcoder - PCM → WAV 封装
//!
//! 将 TTS 返回的裸 PCM 写上标准 44 字节 RIFF/WAVE header，
//! PCM 数据原样拷贝，不重采样、不压缩。

use crate::application::ports::{AudioTranscoderPort, TranscodeError};
use crate::domain::audio::{PcmSpec, PlayableAudio};

/// RIFF header + fmt chunk + data chunk header
pub const WAV_HEADER_LEN: usize = 44;

/// PCM 格式标识
const WAVE_FORMAT_PCM: u16 = 1;

/// WAV 转码器
#[derive(Debug, Clone, Copy, Default)]
pub struct WavTranscoder;

impl WavTranscoder {
    pub fn new() -> Self {
        Self
    }

    fn validate(spec: &PcmSpec) -> Result<(), TranscodeError> {
        if spec.sample_rate == 0 {
            return Err(TranscodeError::InvalidParameter(
                "sample rate must be positive".to_string(),
            ));
        }
        if spec.channels == 0 {
            return Err(TranscodeError::InvalidParameter(
                "channel count must be positive".to_string(),
            ));
        }
        if spec.bits_per_sample == 0 {
            return Err(TranscodeError::InvalidParameter(
                "bit depth must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// 写入 WAV header
    fn write_header(
        wav: &mut Vec<u8>,
        spec: &PcmSpec,
        byte_rate: u32,
        block_align: u16,
        data_size: u32,
    ) {
        let riff_size = 36 + data_size;

        // RIFF header
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&riff_size.to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        // fmt chunk
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        wav.extend_from_slice(&WAVE_FORMAT_PCM.to_le_bytes());
        wav.extend_from_slice(&spec.channels.to_le_bytes());
        wav.extend_from_slice(&spec.sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&spec.bits_per_sample.to_le_bytes());

        // data chunk
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_size.to_le_bytes());
    }
}

impl AudioTranscoderPort for WavTranscoder {
    fn to_container(&self, pcm: &[u8], spec: PcmSpec) -> Result<PlayableAudio, TranscodeError> {
        Self::validate(&spec)?;

        let block_align = u16::try_from(spec.block_align()).map_err(|_| {
            TranscodeError::InvalidParameter(format!(
                "block align overflows: {} channels x {} bits",
                spec.channels, spec.bits_per_sample
            ))
        })?;
        let byte_rate = spec
            .sample_rate
            .checked_mul(spec.block_align())
            .ok_or_else(|| {
                TranscodeError::InvalidParameter(format!(
                    "byte rate overflows: {} Hz x {} bytes per frame",
                    spec.sample_rate,
                    spec.block_align()
                ))
            })?;

        // WAV 的长度字段是 u32
        let data_size = u32::try_from(pcm.len())
            .ok()
            .filter(|size| size.checked_add(36).is_some())
            .ok_or_else(|| {
                TranscodeError::InvalidParameter(format!(
                    "PCM payload too large for WAV: {} bytes",
                    pcm.len()
                ))
            })?;

        let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
        Self::write_header(&mut wav, &spec, byte_rate, block_align, data_size);
        wav.extend_from_slice(pcm);

        // 参数校验后 byte_rate 必为正
        let duration_ms = u64::from(data_size) * 1000 / u64::from(byte_rate);

        tracing::debug!(
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            bits_per_sample = spec.bits_per_sample,
            pcm_size = pcm.len(),
            duration_ms = duration_ms,
            "Wrapped PCM into WAV"
        );

        Ok(PlayableAudio {
            data: wav,
            spec,
            duration_ms,
        })
    }

    fn header_len(&self) -> usize {
        WAV_HEADER_LEN
    }
}
