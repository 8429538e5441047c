//! Transcription Adapter - 语音转文字实现

mod gemini_transcriber;

pub use gemini_transcriber::GeminiTranscriber;
