//! Domain Layer - 领域层
//!
//! 包含两个上下文:
//! - Generation Context: 提示词与引用来源
//! - Audio Context: PCM 到 WAV 的封装与 MIME 解析

pub mod audio;
pub mod generation;
