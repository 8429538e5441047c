//! HTTP Error Handling
//!
//! 业务错误统一以 HTTP 200 + `{errno, error, data}` 返回，
//! `error` 字段只携带面向用户的简短提示

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{ErrorKind, FeatureError};

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const CONFLICT: i32 = 409;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const BAD_GATEWAY: i32 = 502;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 输入缺失或请求格式错误
    BadRequest(String),
    /// 同一功能已有请求在途
    Conflict(String),
    /// 本地处理失败
    Internal(String),
    /// 远端服务失败或响应不完整
    BadGateway(String),
    /// 未配置凭证等导致功能不可用
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn errno(&self) -> i32 {
        match self {
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::Conflict(_) => errno::CONFLICT,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::BadGateway(_) => errno::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errno = self.errno();
        match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno, error = %msg, "Bad request");
            }
            ApiError::Conflict(msg) => {
                tracing::warn!(errno, error = %msg, "Request already in progress");
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno, error = %msg, "Internal server error");
            }
            ApiError::BadGateway(msg) => {
                tracing::error!(errno, error = %msg, "Upstream service failed");
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!(errno, error = %msg, "Service unavailable");
            }
        }

        let response = ErrorResponse::new(errno, self.message());
        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<FeatureError> for ApiError {
    fn from(e: FeatureError) -> Self {
        let message = e.user_message();
        match e.kind {
            ErrorKind::InputMissing => ApiError::BadRequest(message),
            ErrorKind::CredentialMissing => ApiError::ServiceUnavailable(message),
            ErrorKind::Busy => ApiError::Conflict(message),
            ErrorKind::Transport(_)
            | ErrorKind::Status(_)
            | ErrorKind::MalformedResponse(_)
            | ErrorKind::Transcription(_) => ApiError::BadGateway(message),
        }
    }
}
