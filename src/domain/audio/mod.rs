//! Audio Context - 音频容器
//!
//! 职责:
//! - PCM → WAV 容器构建
//! - WAV 头解析
//! - 从 MIME 提取采样率

mod container;
mod errors;
mod mime;

pub use container::{build_wav, pcm_from_le_bytes, WavHeader, WAV_HEADER_LEN};
pub use errors::AudioError;
pub use mime::{is_audio_mime, sample_rate_from_mime};
