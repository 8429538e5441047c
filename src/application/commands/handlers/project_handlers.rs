//! Project Command Handler - 虚构项目生成

use serde::Serialize;
use std::sync::Arc;

use crate::application::commands::GenerateProject;
use crate::application::error::{Feature, FeatureError};
use crate::application::gate::FeatureGate;
use crate::application::ports::{GenerativeEnginePort, TextGenerationRequest};
use crate::domain::generation::Prompt;

/// 默认系统指令
pub const DEFAULT_PROJECT_INSTRUCTION: &str = "You are a satirical solutions architect. \
Generate a single project description in HTML that includes a \"Challenge\" and a \"Solution\" \
that sounds technologically advanced but is physically absurd. \
Use <p> tags for each section and ** for bold text. \
The project should be based on the user's input keyword.";

/// 生成的虚构项目（HTML 片段）
#[derive(Debug, Clone, Serialize)]
pub struct FictionalProject {
    pub html: String,
}

/// GenerateProject Handler
///
/// 与概念解析同构，但不启用搜索 grounding，也不提取来源
pub struct GenerateProjectHandler {
    engine: Arc<dyn GenerativeEnginePort>,
    system_instruction: String,
    gate: FeatureGate,
}

impl GenerateProjectHandler {
    pub fn new(engine: Arc<dyn GenerativeEnginePort>, system_instruction: impl Into<String>) -> Self {
        Self {
            engine,
            system_instruction: system_instruction.into(),
            gate: FeatureGate::new(Feature::Project),
        }
    }

    pub fn gate(&self) -> &FeatureGate {
        &self.gate
    }

    pub async fn handle(&self, command: GenerateProject) -> Result<FictionalProject, FeatureError> {
        const FEATURE: Feature = Feature::Project;

        let keyword =
            Prompt::new(&command.keyword).map_err(|_| FeatureError::input_missing(FEATURE))?;

        if !self.engine.has_credential() {
            return Err(FeatureError::credential_missing(FEATURE));
        }

        let _guard = self
            .gate
            .try_acquire()
            .ok_or_else(|| FeatureError::busy(FEATURE))?;

        let request = TextGenerationRequest::new(format!(
            "Generate a project based on the keyword: \"{}\".",
            keyword
        ))
        .with_system_instruction(self.system_instruction.clone());

        let response = self
            .engine
            .generate_text(request)
            .await
            .map_err(|e| FeatureError::engine(FEATURE, e))?;

        let html = response
            .first_text()
            .ok_or_else(|| FeatureError::malformed(FEATURE, "first candidate has no text"))?
            .to_string();

        tracing::info!(keyword = %keyword, html_len = html.len(), "Fictional project generated");

        Ok(FictionalProject { html })
    }
}
