//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{ConceptAnalysis, Dictation, FictionalProject, Visualization};
use crate::domain::generation::SourceLink;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeechRequestBody {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageRequestBody {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub keyword: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SourceResponse {
    pub label: String,
    pub uri: String,
    pub title: String,
}

impl From<SourceLink> for SourceResponse {
    fn from(source: SourceLink) -> Self {
        Self {
            label: source.label(),
            uri: source.uri,
            title: source.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub id: Uuid,
    pub text: String,
    pub sources: Vec<SourceResponse>,
    pub generated_at: DateTime<Utc>,
}

impl From<ConceptAnalysis> for AnalyzeResponse {
    fn from(analysis: ConceptAnalysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: analysis.text,
            sources: analysis.sources.into_iter().map(Into::into).collect(),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: Uuid,
    pub base64: String,
    pub data_url: String,
    pub generated_at: DateTime<Utc>,
}

impl From<Visualization> for ImageResponse {
    fn from(image: Visualization) -> Self {
        Self {
            id: Uuid::new_v4(),
            data_url: image.data_url(),
            base64: image.base64,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub html: String,
    pub generated_at: DateTime<Utc>,
}

impl From<FictionalProject> for ProjectResponse {
    fn from(project: FictionalProject) -> Self {
        Self {
            id: Uuid::new_v4(),
            html: project.html,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DictationResponse {
    pub transcript: String,
}

impl From<Dictation> for DictationResponse {
    fn from(dictation: Dictation) -> Self {
        Self {
            transcript: dictation.transcript,
        }
    }
}
