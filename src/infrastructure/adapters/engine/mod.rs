//! Generative Engine 适配器
//!
//! - GeminiClient: 调用真实的 Gemini / Imagen 服务
//! - FakeGenerativeEngine: 测试用，不发起网络请求

mod fake_engine;
mod gemini_client;
mod payload;
mod retry;

pub use fake_engine::{FakeFailure, FakeGenerativeEngine, FakeReply};
pub use gemini_client::{GeminiClient, GeminiClientConfig, DEFAULT_BASE_URL};
pub use retry::{retry_with_backoff, RetryPolicy};
