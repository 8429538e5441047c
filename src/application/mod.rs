//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 出站端口定义（GenerativeEngine、TranscriptionSource）
//! - commands: 各功能命令及处理器
//! - gate: 单功能在途请求闸门
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod gate;
pub mod ports;

// Re-exports
pub use commands::{
    AnalyzeConcept,
    DictateQuery,
    GenerateProject,
    NarrateSummary,
    VisualizeConcept,
    // Handlers
    handlers::{
        AnalyzeConceptHandler, ConceptAnalysis, DictateQueryHandler, Dictation,
        FictionalProject, GenerateProjectHandler, NarrateSummaryHandler, Narration,
        Visualization, VisualizeConceptHandler,
    },
};

pub use error::{ErrorKind, Feature, FeatureError};
pub use gate::{FeatureGate, GateGuard};

pub use ports::{
    // Generative engine
    EngineError,
    GenerateContentResponse,
    GenerativeEnginePort,
    ImageRequest,
    InlineAttachment,
    PredictResponse,
    SpeechRequest,
    TextGenerationRequest,
    // Transcription
    AudioClip,
    TranscriptionError,
    TranscriptionSource,
};
