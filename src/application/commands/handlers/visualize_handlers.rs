//! Visualize Command Handler - 概念可视化

use serde::Serialize;
use std::sync::Arc;

use crate::application::commands::VisualizeConcept;
use crate::application::error::{Feature, FeatureError};
use crate::application::gate::FeatureGate;
use crate::application::ports::{GenerativeEnginePort, ImageRequest};
use crate::domain::generation::Prompt;

/// 生成的图片
#[derive(Debug, Clone, Serialize)]
pub struct Visualization {
    /// base64 编码的 PNG
    pub base64: String,
}

impl Visualization {
    /// 可直接作为 `<img src>` 的 data URL
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.base64)
    }
}

/// VisualizeConcept Handler
pub struct VisualizeConceptHandler {
    engine: Arc<dyn GenerativeEnginePort>,
    sample_count: u32,
    gate: FeatureGate,
}

impl VisualizeConceptHandler {
    pub fn new(engine: Arc<dyn GenerativeEnginePort>, sample_count: u32) -> Self {
        Self {
            engine,
            sample_count,
            gate: FeatureGate::new(Feature::Visualize),
        }
    }

    pub fn gate(&self) -> &FeatureGate {
        &self.gate
    }

    pub async fn handle(&self, command: VisualizeConcept) -> Result<Visualization, FeatureError> {
        const FEATURE: Feature = Feature::Visualize;

        let prompt =
            Prompt::new(&command.prompt).map_err(|_| FeatureError::input_missing(FEATURE))?;

        if !self.engine.has_credential() {
            return Err(FeatureError::credential_missing(FEATURE));
        }

        let _guard = self
            .gate
            .try_acquire()
            .ok_or_else(|| FeatureError::busy(FEATURE))?;

        let request = ImageRequest {
            prompt: prompt.into_inner(),
            sample_count: self.sample_count,
        };

        let response = self
            .engine
            .generate_image(request)
            .await
            .map_err(|e| FeatureError::engine(FEATURE, e))?;

        let base64 = response
            .first_image()
            .ok_or_else(|| FeatureError::malformed(FEATURE, "no prediction with image bytes"))?
            .to_string();

        tracing::info!(
            predictions = response.predictions.len(),
            image_b64_len = base64.len(),
            "Concept visualized"
        );

        Ok(Visualization { base64 })
    }
}
