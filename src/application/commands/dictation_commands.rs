//! Dictation Commands - 语音输入

use crate::application::ports::AudioClip;

/// 转写一段录音，用于填充解析输入框
#[derive(Debug, Clone)]
pub struct DictateQuery {
    pub clip: AudioClip,
}
