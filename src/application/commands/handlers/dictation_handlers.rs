//! Dictation Command Handler - 语音输入

use serde::Serialize;
use std::sync::Arc;

use crate::application::commands::DictateQuery;
use crate::application::error::{Feature, FeatureError};
use crate::application::gate::FeatureGate;
use crate::application::ports::{TranscriptionError, TranscriptionSource};
use crate::domain::audio::WavHeader;

/// 转写结果，用于回填解析输入框
#[derive(Debug, Clone, Serialize)]
pub struct Dictation {
    pub transcript: String,
}

/// DictateQuery Handler
pub struct DictateQueryHandler {
    source: Arc<dyn TranscriptionSource>,
    gate: FeatureGate,
}

impl DictateQueryHandler {
    pub fn new(source: Arc<dyn TranscriptionSource>) -> Self {
        Self {
            source,
            gate: FeatureGate::new(Feature::Dictation),
        }
    }

    pub fn gate(&self) -> &FeatureGate {
        &self.gate
    }

    pub async fn handle(&self, command: DictateQuery) -> Result<Dictation, FeatureError> {
        const FEATURE: Feature = Feature::Dictation;

        if command.clip.data.is_empty() {
            return Err(FeatureError::input_missing(FEATURE));
        }

        if !self.source.is_available() {
            return Err(FeatureError::credential_missing(FEATURE));
        }

        let _guard = self
            .gate
            .try_acquire()
            .ok_or_else(|| FeatureError::busy(FEATURE))?;

        // WAV 录音先校验头部，避免把损坏的数据发给远端
        if is_wav(&command.clip.mime_type) {
            let header = WavHeader::parse(&command.clip.data).map_err(|e| {
                FeatureError::transcription(TranscriptionError::AudioCapture(e.to_string()))
            })?;
            tracing::debug!(
                sample_rate = header.sample_rate,
                channels = header.channels,
                duration_ms = header.duration_ms(),
                "Dictation clip received"
            );
        }

        let transcript = self
            .source
            .transcribe(command.clip)
            .await
            .map_err(FeatureError::transcription)?;

        tracing::info!(transcript_len = transcript.len(), "Dictation transcribed");

        Ok(Dictation { transcript })
    }
}

fn is_wav(mime_type: &str) -> bool {
    matches!(
        mime_type.split(';').next().map(str::trim),
        Some("audio/wav" | "audio/x-wav" | "audio/wave")
    )
}
