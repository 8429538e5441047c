//! Transcription Port - 语音转文字能力
//!
//! 一次调用只产出一个结果：一段最终转写文本，或一个错误码，二者不会同时出现

use async_trait::async_trait;
use thiserror::Error;

/// 转写错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("no speech detected")]
    NoSpeech,

    #[error("audio capture failed: {0}")]
    AudioCapture(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("transcription not allowed")]
    NotAllowed,
}

impl TranscriptionError {
    /// 稳定的错误码，直接展示给用户
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoSpeech => "no-speech",
            Self::AudioCapture(_) => "audio-capture",
            Self::Network(_) => "network",
            Self::NotAllowed => "not-allowed",
        }
    }
}

/// 一段录音
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Transcription Source
#[async_trait]
pub trait TranscriptionSource: Send + Sync {
    /// 当前是否可用（例如缺少凭证时不可用）
    fn is_available(&self) -> bool {
        true
    }

    /// 转写一段录音
    async fn transcribe(&self, clip: AudioClip) -> Result<String, TranscriptionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(TranscriptionError::NoSpeech.code(), "no-speech");
        assert_eq!(
            TranscriptionError::AudioCapture("bad header".into()).code(),
            "audio-capture"
        );
        assert_eq!(TranscriptionError::Network("down".into()).code(), "network");
        assert_eq!(TranscriptionError::NotAllowed.code(), "not-allowed");
    }
}
