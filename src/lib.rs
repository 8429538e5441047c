//! Resonance - 生成式 AI 提示词服务
//!
//! 把文本、语音、图像三类生成能力包装成一组 HTTP 功能接口
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Generation Context: 提示词与引用来源
//! - Audio Context: PCM → WAV 容器
//!
//! 应用层 (application/):
//! - Ports: 端口定义（GenerativeEngine, TranscriptionSource）
//! - Commands: 各功能的命令处理器
//! - Gate: 单功能在途请求闸门
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: Gemini Client（带退避重试）, Gemini Transcriber

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
