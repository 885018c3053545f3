//! HTTP Error Handling
//!
//! 所有后端失败在这里统一转换为 500：
//! - 读取失败返回 JSON `{"error": "Error retrieving data", "details": ...}`
//! - 写入失败返回各路由固定的纯文本

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorResponse;
use crate::application::ApplicationError;

pub const RETRIEVE_ERROR: &str = "Error retrieving data";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 读取节点失败
    Retrieve {
        path: String,
        details: String,
        status: Option<u16>,
    },
    /// 写入子树失败，`message` 为该路由的固定响应文本
    Save {
        message: &'static str,
        details: String,
        status: Option<u16>,
    },
}

impl ApiError {
    pub fn retrieve(path: impl Into<String>, err: ApplicationError) -> Self {
        ApiError::Retrieve {
            path: path.into(),
            details: err.details(),
            status: err.status(),
        }
    }

    pub fn save(message: &'static str, err: ApplicationError) -> Self {
        ApiError::Save {
            message,
            details: err.details(),
            status: err.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Retrieve {
                path,
                details,
                status,
            } => {
                tracing::error!(
                    path = %path,
                    backend_status = ?status,
                    error = %details,
                    "{}",
                    RETRIEVE_ERROR
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(RETRIEVE_ERROR, details)),
                )
                    .into_response()
            }
            ApiError::Save {
                message,
                details,
                status,
            } => {
                tracing::error!(backend_status = ?status, error = %details, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
