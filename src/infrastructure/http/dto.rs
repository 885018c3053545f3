//! Data Transfer Objects

use serde::Serialize;
use serde_json::Value;

/// `GET /data/*path` 成功响应，节点不存在时 `data` 为 null
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub data: Value,
}

/// 读取失败响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}
