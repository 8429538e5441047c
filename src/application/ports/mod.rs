//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod generative_engine;
mod transcription;

pub use generative_engine::{
    Candidate, Content, EngineError, GenerateContentResponse, GenerativeEnginePort,
    GroundingAttribution, GroundingMetadata, ImageRequest, InlineAttachment, InlineData, Part,
    PredictResponse, Prediction, SpeechRequest, TextGenerationRequest, WebSource,
};
pub use transcription::{AudioClip, TranscriptionError, TranscriptionSource};
