//! Gemini Transcriber - 用文本生成接口转写录音
//!
//! 录音作为内联附件随提示词一起发送，模型只返回逐字转写

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::{
    AudioClip, EngineError, GenerativeEnginePort, InlineAttachment, TextGenerationRequest,
    TranscriptionError, TranscriptionSource,
};

const TRANSCRIBE_PROMPT: &str = "Transcribe the spoken audio verbatim.";

const TRANSCRIBE_INSTRUCTION: &str = "You are a speech-to-text engine. \
Reply with the transcript only, without quotes or commentary. \
If the audio contains no speech, reply with an empty message.";

/// 基于 GenerativeEnginePort 的转写源
pub struct GeminiTranscriber {
    engine: Arc<dyn GenerativeEnginePort>,
}

impl GeminiTranscriber {
    pub fn new(engine: Arc<dyn GenerativeEnginePort>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl TranscriptionSource for GeminiTranscriber {
    fn is_available(&self) -> bool {
        self.engine.has_credential()
    }

    async fn transcribe(&self, clip: AudioClip) -> Result<String, TranscriptionError> {
        let request = TextGenerationRequest::new(TRANSCRIBE_PROMPT)
            .with_system_instruction(TRANSCRIBE_INSTRUCTION)
            .with_attachment(InlineAttachment {
                mime_type: clip.mime_type,
                data: clip.data,
            });

        let response = self
            .engine
            .generate_text(request)
            .await
            .map_err(|e| match e {
                EngineError::MissingCredential => TranscriptionError::NotAllowed,
                EngineError::Status { status: 401 | 403, .. } => TranscriptionError::NotAllowed,
                other => TranscriptionError::Network(other.to_string()),
            })?;

        match response.first_text().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(TranscriptionError::NoSpeech),
        }
    }
}
