//! Speech Handler - 朗读
//!
//! 成功时直接返回 `audio/wav` 字节流，元数据放在响应头中

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::NarrateSummary;
use crate::infrastructure::http::dto::SpeechRequestBody;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub const SAMPLE_RATE_HEADER: &str = "X-Sample-Rate";
pub const DURATION_HEADER: &str = "X-Duration-Ms";

pub async fn narrate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeechRequestBody>,
) -> Result<Response, ApiError> {
    let command = NarrateSummary { text: req.text };

    let narration = state.narrate_handler.handle(command).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(header::CONTENT_LENGTH, narration.wav.len())
        .header(SAMPLE_RATE_HEADER, narration.sample_rate)
        .header(DURATION_HEADER, narration.duration_ms)
        .body(Body::from(narration.wav))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}
