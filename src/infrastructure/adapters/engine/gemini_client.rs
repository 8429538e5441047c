//! Gemini Client - 调用 Gemini / Imagen REST 接口
//!
//! 实现 GenerativeEnginePort trait，通过 HTTP 调用远端生成服务
//!
//! 远端 API:
//! POST {base_url}/models/{text_model}:generateContent?key=...   (文本 + 搜索 grounding)
//! POST {base_url}/models/{tts_model}:generateContent?key=...    (语音合成)
//! POST {base_url}/models/{image_model}:predict?key=...          (图像生成)
//!
//! 只有传输层失败会按退避策略重试；非 2xx 状态在重试循环之后检查，不重试。

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::payload::{ImagePayload, SpeechPayload, TextPayload};
use super::retry::{retry_with_backoff, RetryPolicy};
use crate::application::ports::{
    EngineError, GenerateContentResponse, GenerativeEnginePort, ImageRequest, PredictResponse,
    SpeechRequest, TextGenerationRequest,
};

/// 默认 API 根路径
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API key，未配置时所有调用直接返回 MissingCredential
    pub api_key: Option<String>,
    /// API 根路径
    pub base_url: String,
    /// 文本生成模型
    pub text_model: String,
    /// 语音合成模型
    pub tts_model: String,
    /// 图像生成模型
    pub image_model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 传输层重试策略
    pub retry: RetryPolicy,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: "gemini-2.5-flash-preview-05-20".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            image_model: "imagen-3.0-generate-002".to_string(),
            timeout_secs: 60,
            retry: RetryPolicy::default(),
        }
    }
}

impl GeminiClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Gemini 客户端
pub struct GeminiClient {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    pub fn new(config: GeminiClientConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiClientConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str, EngineError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(EngineError::MissingCredential)
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    /// 发送 JSON 请求并解析响应信封
    async fn post_json<P, R>(&self, url: &str, payload: &P) -> Result<R, EngineError>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let key = self.api_key()?;

        tracing::debug!(url = %url, "Sending generative request");

        let response = retry_with_backoff(self.config.retry, || {
            self.client
                .post(url)
                .query(&[("key", key)])
                .json(payload)
                .send()
        })
        .await
        .map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout
            } else if e.is_connect() {
                EngineError::Transport(format!("Cannot connect to generative service: {}", e))
            } else {
                EngineError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| EngineError::Transport(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| EngineError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl GenerativeEnginePort for GeminiClient {
    fn has_credential(&self) -> bool {
        self.api_key().is_ok()
    }

    async fn generate_text(
        &self,
        request: TextGenerationRequest,
    ) -> Result<GenerateContentResponse, EngineError> {
        let url = self.endpoint(&self.config.text_model, "generateContent");
        let payload = TextPayload::from(&request);

        let response: GenerateContentResponse = self.post_json(&url, &payload).await?;

        tracing::info!(
            model = %self.config.text_model,
            web_search = request.web_search,
            candidates = response.candidates.len(),
            "Text generation completed"
        );

        Ok(response)
    }

    async fn synthesize_speech(
        &self,
        request: SpeechRequest,
    ) -> Result<GenerateContentResponse, EngineError> {
        let url = self.endpoint(&self.config.tts_model, "generateContent");
        let payload = SpeechPayload::new(&request, &self.config.tts_model);

        let response: GenerateContentResponse = self.post_json(&url, &payload).await?;

        tracing::info!(
            model = %self.config.tts_model,
            voice = %request.voice_name,
            text_len = request.text.len(),
            "Speech synthesis completed"
        );

        Ok(response)
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<PredictResponse, EngineError> {
        let url = self.endpoint(&self.config.image_model, "predict");
        let payload = ImagePayload::from(&request);

        let response: PredictResponse = self.post_json(&url, &payload).await?;

        tracing::info!(
            model = %self.config.image_model,
            predictions = response.predictions.len(),
            "Image generation completed"
        );

        Ok(response)
    }
}
