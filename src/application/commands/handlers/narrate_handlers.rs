//! Narrate Command Handler - 朗读

use base64::Engine;
use std::sync::Arc;

use crate::application::commands::NarrateSummary;
use crate::application::error::{Feature, FeatureError};
use crate::application::gate::FeatureGate;
use crate::application::ports::{GenerativeEnginePort, SpeechRequest};
use crate::domain::audio::{build_wav, is_audio_mime, pcm_from_le_bytes, sample_rate_from_mime};

/// 默认音色
pub const DEFAULT_VOICE_NAME: &str = "Fenrir";

/// 朗读结果：可直接播放的 WAV
#[derive(Debug, Clone)]
pub struct Narration {
    pub wav: Vec<u8>,
    pub sample_rate: u32,
    pub sample_count: usize,
    pub duration_ms: u64,
}

/// NarrateSummary Handler
pub struct NarrateSummaryHandler {
    engine: Arc<dyn GenerativeEnginePort>,
    voice_name: String,
    gate: FeatureGate,
}

impl NarrateSummaryHandler {
    pub fn new(engine: Arc<dyn GenerativeEnginePort>, voice_name: impl Into<String>) -> Self {
        Self {
            engine,
            voice_name: voice_name.into(),
            gate: FeatureGate::new(Feature::Narrate),
        }
    }

    pub fn gate(&self) -> &FeatureGate {
        &self.gate
    }

    pub async fn handle(&self, command: NarrateSummary) -> Result<Narration, FeatureError> {
        const FEATURE: Feature = Feature::Narrate;

        let text = command.text.trim();
        if text.is_empty() {
            return Err(FeatureError::input_missing(FEATURE));
        }

        if !self.engine.has_credential() {
            return Err(FeatureError::credential_missing(FEATURE));
        }

        let _guard = self
            .gate
            .try_acquire()
            .ok_or_else(|| FeatureError::busy(FEATURE))?;

        let request = SpeechRequest {
            text: text.to_string(),
            voice_name: self.voice_name.clone(),
        };

        let response = self
            .engine
            .synthesize_speech(request)
            .await
            .map_err(|e| FeatureError::engine(FEATURE, e))?;

        let inline = response
            .first_inline_data()
            .ok_or_else(|| FeatureError::malformed(FEATURE, "no inline audio data"))?;
        let (Some(data), Some(mime_type)) = (inline.data.as_deref(), inline.mime_type.as_deref())
        else {
            return Err(FeatureError::malformed(FEATURE, "inline data missing data or mime type"));
        };
        if data.is_empty() || !is_audio_mime(mime_type) {
            return Err(FeatureError::malformed(
                FEATURE,
                format!("unexpected inline payload: {}", mime_type),
            ));
        }

        let sample_rate =
            sample_rate_from_mime(mime_type).map_err(|e| FeatureError::malformed(FEATURE, e.to_string()))?;

        let pcm = base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| FeatureError::malformed(FEATURE, format!("Failed to decode base64 audio: {e}")))?;

        let samples = pcm_from_le_bytes(&pcm);
        let wav = build_wav(&samples, sample_rate);
        let duration_ms = samples.len() as u64 * 1000 / sample_rate as u64;

        tracing::info!(
            sample_rate,
            samples = samples.len(),
            duration_ms,
            wav_size = wav.len(),
            "Narration synthesized"
        );

        Ok(Narration {
            wav,
            sample_rate,
            sample_count: samples.len(),
            duration_ms,
        })
    }
}
