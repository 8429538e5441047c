//! Image Handler - 概念可视化

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::VisualizeConcept;
use crate::infrastructure::http::dto::{ApiResponse, ImageRequestBody, ImageResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn visualize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImageRequestBody>,
) -> Result<Json<ApiResponse<ImageResponse>>, ApiError> {
    let command = VisualizeConcept { prompt: req.prompt };

    let image = state.visualize_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(image.into())))
}
