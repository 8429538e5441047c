//! Generative Engine Port - 生成式 AI 服务抽象
//!
//! 定义文本生成、语音合成、图像生成三个远端能力的抽象接口，
//! 具体实现在 infrastructure/adapters 层。
//!
//! 响应信封保持与远端 JSON 同构，所有字段都是可选的，
//! 字段提取由各功能的命令处理器负责。

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// 引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API key is not configured")]
    MissingCredential,
}

// ============================================================================
// Requests
// ============================================================================

/// 内联附件（例如待转写的录音）
#[derive(Debug, Clone)]
pub struct InlineAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// 文本生成请求
#[derive(Debug, Clone)]
pub struct TextGenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// 是否启用 Google 搜索 grounding
    pub web_search: bool,
    pub attachment: Option<InlineAttachment>,
}

impl TextGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            web_search: false,
            attachment: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    pub fn with_attachment(mut self, attachment: InlineAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_name: String,
}

/// 图像生成请求
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub sample_count: u32,
}

// ============================================================================
// Response envelopes
// ============================================================================

/// generateContent 响应
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    /// base64 编码的数据
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_attributions: Vec<GroundingAttribution>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingAttribution {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// 第一个候选的第一个 part
    pub fn first_part(&self) -> Option<&Part> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()
    }

    /// 第一个候选的文本（空字符串视为不存在）
    pub fn first_text(&self) -> Option<&str> {
        self.first_part()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    /// 第一个候选的内联数据
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.first_part()?.inline_data.as_ref()
    }

    /// 第一个候选的引用来源 (uri, title)
    pub fn attributions(&self) -> Vec<(Option<String>, Option<String>)> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_attributions
                    .iter()
                    .map(|a| match &a.web {
                        Some(web) => (web.uri.clone(), web.title.clone()),
                        None => (None, None),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Imagen predict 响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl PredictResponse {
    /// 第一张图片的 base64 数据
    pub fn first_image(&self) -> Option<&str> {
        self.predictions
            .first()?
            .bytes_base64_encoded
            .as_deref()
            .filter(|data| !data.is_empty())
    }
}

/// Generative Engine Port
///
/// 外部生成式 AI 服务的抽象接口
#[async_trait]
pub trait GenerativeEnginePort: Send + Sync {
    /// 是否配置了访问凭证
    fn has_credential(&self) -> bool;

    /// 文本生成（可选搜索 grounding）
    async fn generate_text(
        &self,
        request: TextGenerationRequest,
    ) -> Result<GenerateContentResponse, EngineError>;

    /// 语音合成，返回内联 PCM 数据
    async fn synthesize_speech(
        &self,
        request: SpeechRequest,
    ) -> Result<GenerateContentResponse, EngineError>;

    /// 图像生成
    async fn generate_image(&self, request: ImageRequest) -> Result<PredictResponse, EngineError>;
}
