//! Fake Generative Engine - 用于测试的生成引擎
//!
//! 返回预设的响应信封，不发起任何网络请求，并记录收到的请求

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    EngineError, GenerateContentResponse, GenerativeEnginePort, ImageRequest, PredictResponse,
    SpeechRequest, TextGenerationRequest,
};

/// 预设的失败类型
#[derive(Debug, Clone)]
pub enum FakeFailure {
    Transport,
    Status(u16),
    InvalidResponse,
}

impl FakeFailure {
    fn to_error(&self) -> EngineError {
        match self {
            Self::Transport => EngineError::Transport("connection refused".to_string()),
            Self::Status(status) => EngineError::Status {
                status: *status,
                body: "fake failure".to_string(),
            },
            Self::InvalidResponse => EngineError::InvalidResponse("not json".to_string()),
        }
    }
}

/// 预设的返回值
pub type FakeReply<T> = Result<T, FakeFailure>;

/// Fake Generative Engine
pub struct FakeGenerativeEngine {
    credential: bool,
    delay: Option<Duration>,
    text_reply: FakeReply<GenerateContentResponse>,
    speech_reply: FakeReply<GenerateContentResponse>,
    image_reply: FakeReply<PredictResponse>,
    calls: AtomicUsize,
    text_requests: Mutex<Vec<TextGenerationRequest>>,
    speech_requests: Mutex<Vec<SpeechRequest>>,
    image_requests: Mutex<Vec<ImageRequest>>,
}

impl Default for FakeGenerativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGenerativeEngine {
    /// 带凭证、所有端点返回空信封
    pub fn new() -> Self {
        Self {
            credential: true,
            delay: None,
            text_reply: Ok(GenerateContentResponse::default()),
            speech_reply: Ok(GenerateContentResponse::default()),
            image_reply: Ok(PredictResponse::default()),
            calls: AtomicUsize::new(0),
            text_requests: Mutex::new(Vec::new()),
            speech_requests: Mutex::new(Vec::new()),
            image_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn without_credential(mut self) -> Self {
        self.credential = false;
        self
    }

    /// 每次调用前等待，用于模拟在途请求
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_text_reply(mut self, reply: FakeReply<GenerateContentResponse>) -> Self {
        self.text_reply = reply;
        self
    }

    pub fn with_speech_reply(mut self, reply: FakeReply<GenerateContentResponse>) -> Self {
        self.speech_reply = reply;
        self
    }

    pub fn with_image_reply(mut self, reply: FakeReply<PredictResponse>) -> Self {
        self.image_reply = reply;
        self
    }

    /// 总调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn text_requests(&self) -> Vec<TextGenerationRequest> {
        self.text_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn speech_requests(&self) -> Vec<SpeechRequest> {
        self.speech_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn image_requests(&self) -> Vec<ImageRequest> {
        self.image_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    async fn begin_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl GenerativeEnginePort for FakeGenerativeEngine {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn generate_text(
        &self,
        request: TextGenerationRequest,
    ) -> Result<GenerateContentResponse, EngineError> {
        if let Ok(mut requests) = self.text_requests.lock() {
            requests.push(request);
        }
        self.begin_call().await;
        self.text_reply.clone().map_err(|f| f.to_error())
    }

    async fn synthesize_speech(
        &self,
        request: SpeechRequest,
    ) -> Result<GenerateContentResponse, EngineError> {
        if let Ok(mut requests) = self.speech_requests.lock() {
            requests.push(request);
        }
        self.begin_call().await;
        self.speech_reply.clone().map_err(|f| f.to_error())
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<PredictResponse, EngineError> {
        if let Ok(mut requests) = self.image_requests.lock() {
            requests.push(request);
        }
        self.begin_call().await;
        self.image_reply.clone().map_err(|f| f.to_error())
    }
}
