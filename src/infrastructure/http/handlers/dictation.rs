//! Dictation Handler - 语音输入
//!
//! 请求体为原始录音字节，Content-Type 即录音的 MIME

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use std::sync::Arc;

use crate::application::{AudioClip, DictateQuery};
use crate::infrastructure::http::dto::{ApiResponse, DictationResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn dictate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<DictationResponse>>, ApiError> {
    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with("audio/"))
        .ok_or_else(|| ApiError::BadRequest("Content-Type must be an audio MIME type".to_string()))?
        .to_string();

    let command = DictateQuery {
        clip: AudioClip {
            mime_type,
            data: body.to_vec(),
        },
    };

    let dictation = state.dictation_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(dictation.into())))
}
