//! Application State
//!
//! 包含所有功能 Handler 的应用状态

use std::sync::Arc;

use crate::application::commands::handlers::{
    DEFAULT_ANALYST_INSTRUCTION, DEFAULT_PROJECT_INSTRUCTION, DEFAULT_VOICE_NAME,
};
use crate::application::{
    AnalyzeConceptHandler, DictateQueryHandler, GenerateProjectHandler, GenerativeEnginePort,
    NarrateSummaryHandler, TranscriptionSource, VisualizeConceptHandler,
};
use crate::config::FeaturesConfig;

/// 应用状态
///
/// 每个功能的 Handler 各自持有一把闸门，因此整个进程内同一功能同时只有一个请求在途
pub struct AppState {
    // ========== Ports ==========
    pub engine: Arc<dyn GenerativeEnginePort>,
    pub transcriber: Arc<dyn TranscriptionSource>,

    // ========== Command Handlers ==========
    pub analyze_handler: AnalyzeConceptHandler,
    pub narrate_handler: NarrateSummaryHandler,
    pub visualize_handler: VisualizeConceptHandler,
    pub project_handler: GenerateProjectHandler,
    pub dictation_handler: DictateQueryHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        engine: Arc<dyn GenerativeEnginePort>,
        transcriber: Arc<dyn TranscriptionSource>,
        features: &FeaturesConfig,
    ) -> Self {
        let analyst_instruction = features
            .analyst_instruction
            .clone()
            .unwrap_or_else(|| DEFAULT_ANALYST_INSTRUCTION.to_string());
        let project_instruction = features
            .project_instruction
            .clone()
            .unwrap_or_else(|| DEFAULT_PROJECT_INSTRUCTION.to_string());

        Self {
            engine: engine.clone(),
            transcriber: transcriber.clone(),

            analyze_handler: AnalyzeConceptHandler::new(engine.clone(), analyst_instruction),
            narrate_handler: NarrateSummaryHandler::new(engine.clone(), features.voice_name.clone()),
            visualize_handler: VisualizeConceptHandler::new(
                engine.clone(),
                features.image_sample_count,
            ),
            project_handler: GenerateProjectHandler::new(engine.clone(), project_instruction),
            dictation_handler: DictateQueryHandler::new(transcriber),
        }
    }

    /// 使用内置指令和默认音色创建
    pub fn with_defaults(
        engine: Arc<dyn GenerativeEnginePort>,
        transcriber: Arc<dyn TranscriptionSource>,
    ) -> Self {
        let features = FeaturesConfig {
            voice_name: DEFAULT_VOICE_NAME.to_string(),
            ..FeaturesConfig::default()
        };
        Self::new(engine, transcriber, &features)
    }
}
