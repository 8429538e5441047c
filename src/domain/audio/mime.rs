//! 音频 MIME 类型解析
//!
//! TTS 端点返回原始 PCM，采样率编码在 MIME 参数里，例如 `audio/L16;codec=pcm;rate=24000`

use super::AudioError;

const AUDIO_PREFIX: &str = "audio/";

/// 检查 MIME 是否为音频类型
pub fn is_audio_mime(mime_type: &str) -> bool {
    mime_type.starts_with(AUDIO_PREFIX)
}

/// 从 MIME 中提取 `rate=<digits>` 参数
///
/// 取 `rate=` 之后连续的数字；没有数字或数值为 0 都视为错误
pub fn sample_rate_from_mime(mime_type: &str) -> Result<u32, AudioError> {
    if !is_audio_mime(mime_type) {
        return Err(AudioError::NotAudio(mime_type.to_string()));
    }

    let start = mime_type
        .find("rate=")
        .map(|pos| pos + "rate=".len())
        .ok_or_else(|| AudioError::MissingRate(mime_type.to_string()))?;

    let digits: String = mime_type[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return Err(AudioError::MissingRate(mime_type.to_string()));
    }

    match digits.parse::<u32>() {
        Ok(rate) if rate > 0 => Ok(rate),
        _ => Err(AudioError::InvalidRate(mime_type.to_string())),
    }
}
