//! Analyze Command Handler - 概念解析

use serde::Serialize;
use std::sync::Arc;

use crate::application::commands::AnalyzeConcept;
use crate::application::error::{Feature, FeatureError};
use crate::application::gate::FeatureGate;
use crate::application::ports::{GenerativeEnginePort, TextGenerationRequest};
use crate::domain::generation::{collect_sources, Prompt, SourceLink};

/// 默认系统指令
pub const DEFAULT_ANALYST_INSTRUCTION: &str = "Act as a senior cloud solutions architect. \
Provide a concise, clear, and technically accurate explanation of the user's query in one short paragraph. \
Your response should be professional and focused on security, efficiency, and scale.";

/// 解析结果
#[derive(Debug, Clone, Serialize)]
pub struct ConceptAnalysis {
    pub text: String,
    pub sources: Vec<SourceLink>,
}

/// AnalyzeConcept Handler
///
/// 带 Google 搜索 grounding 的文本生成，附带过滤后的引用来源
pub struct AnalyzeConceptHandler {
    engine: Arc<dyn GenerativeEnginePort>,
    system_instruction: String,
    gate: FeatureGate,
}

impl AnalyzeConceptHandler {
    pub fn new(engine: Arc<dyn GenerativeEnginePort>, system_instruction: impl Into<String>) -> Self {
        Self {
            engine,
            system_instruction: system_instruction.into(),
            gate: FeatureGate::new(Feature::Analyze),
        }
    }

    pub fn gate(&self) -> &FeatureGate {
        &self.gate
    }

    pub async fn handle(&self, command: AnalyzeConcept) -> Result<ConceptAnalysis, FeatureError> {
        const FEATURE: Feature = Feature::Analyze;

        let prompt = Prompt::new(&command.query).map_err(|_| FeatureError::input_missing(FEATURE))?;

        if !self.engine.has_credential() {
            return Err(FeatureError::credential_missing(FEATURE));
        }

        let _guard = self
            .gate
            .try_acquire()
            .ok_or_else(|| FeatureError::busy(FEATURE))?;

        let request = TextGenerationRequest::new(prompt.into_inner())
            .with_system_instruction(self.system_instruction.clone())
            .with_web_search();

        let response = self
            .engine
            .generate_text(request)
            .await
            .map_err(|e| FeatureError::engine(FEATURE, e))?;

        let text = response
            .first_text()
            .ok_or_else(|| FeatureError::malformed(FEATURE, "first candidate has no text"))?
            .to_string();
        let sources = collect_sources(response.attributions());

        tracing::info!(
            text_len = text.len(),
            sources = sources.len(),
            "Concept analysis completed"
        );

        Ok(ConceptAnalysis { text, sources })
    }
}
