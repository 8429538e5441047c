//! Project Handler - 虚构项目生成

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateProject;
use crate::infrastructure::http::dto::{ApiResponse, ProjectRequest, ProjectResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn generate_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    let command = GenerateProject {
        keyword: req.keyword,
    };

    let project = state.project_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(project.into())))
}
