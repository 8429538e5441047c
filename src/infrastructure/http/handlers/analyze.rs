//! Analyze Handler - 概念解析

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::AnalyzeConcept;
use crate::infrastructure::http::dto::{AnalyzeRequest, AnalyzeResponse, ApiResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let command = AnalyzeConcept { query: req.query };

    let analysis = state.analyze_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(analysis.into())))
}
