//! 应用层错误定义
//!
//! 每个功能流程统一返回 `FeatureError`，对外只展示简短的功能相关提示

use thiserror::Error;

use crate::application::ports::{EngineError, TranscriptionError};

/// 功能标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// 概念解析（带搜索 grounding 的文本生成）
    Analyze,
    /// 朗读解析结果
    Narrate,
    /// 概念可视化（图像生成）
    Visualize,
    /// 虚构项目生成
    Project,
    /// 语音输入
    Dictation,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Narrate => "narrate",
            Self::Visualize => "visualize",
            Self::Project => "project",
            Self::Dictation => "dictation",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 错误类别
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// 必填输入为空
    #[error("input is empty")]
    InputMissing,

    /// 未配置 API key
    #[error("credential is not configured")]
    CredentialMissing,

    /// 同一功能的上一次请求尚未结束
    #[error("request already in flight")]
    Busy,

    /// 网络/传输失败
    #[error("transport failure: {0}")]
    Transport(String),

    /// 非成功 HTTP 状态
    #[error("HTTP status {0}")]
    Status(u16),

    /// 响应缺字段或无法解析
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// 转写源返回的错误码
    #[error("transcription failed: {0}")]
    Transcription(&'static str),
}

/// 功能流程错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{feature} failed: {kind}")]
pub struct FeatureError {
    pub feature: Feature,
    pub kind: ErrorKind,
}

impl FeatureError {
    pub fn new(feature: Feature, kind: ErrorKind) -> Self {
        Self { feature, kind }
    }

    pub fn input_missing(feature: Feature) -> Self {
        Self::new(feature, ErrorKind::InputMissing)
    }

    pub fn credential_missing(feature: Feature) -> Self {
        tracing::warn!(feature = %feature, "API key is not configured");
        Self::new(feature, ErrorKind::CredentialMissing)
    }

    pub fn busy(feature: Feature) -> Self {
        tracing::warn!(feature = %feature, "Request rejected, feature is busy");
        Self::new(feature, ErrorKind::Busy)
    }

    /// 响应缺字段（会记录诊断日志）
    pub fn malformed(feature: Feature, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::error!(feature = %feature, detail = %detail, "Malformed engine response");
        Self::new(feature, ErrorKind::MalformedResponse(detail))
    }

    /// 引擎调用失败（会记录诊断日志）
    pub fn engine(feature: Feature, err: EngineError) -> Self {
        tracing::error!(feature = %feature, error = %err, "Engine call failed");
        let kind = match err {
            EngineError::Transport(msg) => ErrorKind::Transport(msg),
            EngineError::Timeout => ErrorKind::Transport("request timeout".to_string()),
            EngineError::Status { status, .. } => ErrorKind::Status(status),
            EngineError::InvalidResponse(msg) => ErrorKind::MalformedResponse(msg),
            EngineError::MissingCredential => ErrorKind::CredentialMissing,
        };
        Self::new(feature, kind)
    }

    pub fn transcription(err: TranscriptionError) -> Self {
        tracing::error!(error = %err, code = err.code(), "Speech recognition failed");
        Self::new(Feature::Dictation, ErrorKind::Transcription(err.code()))
    }

    /// 展示给用户的提示
    pub fn user_message(&self) -> String {
        use ErrorKind::*;
        use Feature::*;

        let text = match (&self.kind, self.feature) {
            (Busy, _) => "This request is already in progress. Please wait.",
            (Transcription(code), _) => return format!("Speech recognition failed: {}", code),

            (InputMissing, Analyze) => {
                "Input field is empty. Please enter a technical concept to analyze."
            }
            (InputMissing, Narrate) => "Please generate a summary first to hear it.",
            (InputMissing, Visualize) => "Please enter a concept to visualize.",
            (InputMissing, Project) => "Please enter a keyword for the fictional project.",
            (InputMissing, Dictation) => "No audio was captured. Please try again.",

            (CredentialMissing, Analyze) => "API key is not configured. Analysis is unavailable.",
            (CredentialMissing, Narrate) => {
                "API key is not configured. Audio generation is unavailable."
            }
            (CredentialMissing, Visualize) => {
                "API key is not configured. Image visualization is unavailable."
            }
            (CredentialMissing, Project) => {
                "API key is not configured. Fictional project generation is unavailable."
            }
            (CredentialMissing, Dictation) => {
                "API key is not configured. Speech recognition is unavailable."
            }

            (Transport(_) | Status(_), Analyze) => {
                "Connection error. Could not reach the analysis engine. Please check your network."
            }
            (Transport(_) | Status(_), Narrate) => {
                "Audio generation failed. Please check your network."
            }
            (Transport(_) | Status(_), Visualize) => {
                "Image generation failed. Check your network connection."
            }
            (Transport(_) | Status(_), Project) => {
                "Fictional project generation failed. Please check your network."
            }
            (Transport(_) | Status(_), Dictation) => {
                "Speech recognition failed: network"
            }

            (MalformedResponse(_), Analyze) => {
                "Analysis failed: Could not generate a meaningful summary. Please try a different query."
            }
            (MalformedResponse(_), Narrate) => {
                "Failed to generate audio. The API response was empty."
            }
            (MalformedResponse(_), Visualize) => {
                "Image generation failed. Please try a different prompt."
            }
            (MalformedResponse(_), Project) => {
                "Fictional project generation failed. Please try again."
            }
            (MalformedResponse(_), Dictation) => "Speech recognition failed: no-speech",
        };

        text.to_string()
    }
}
