//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping         GET   健康检查
//! - /api/analyze      POST  概念解析（带搜索来源）
//! - /api/speech       POST  朗读，返回 audio/wav
//! - /api/image        POST  概念可视化
//! - /api/project      POST  虚构项目生成
//! - /api/dictation    POST  语音输入（原始录音字节）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/analyze", post(handlers::analyze))
        .route("/speech", post(handlers::narrate))
        .route("/image", post(handlers::visualize))
        .route("/project", post(handlers::generate_project))
        .route("/dictation", post(handlers::dictate))
}
