//! Hierarchical Store Port - 远程层级数据库抽象
//!
//! 只有两个操作：读取节点、向父节点浅合并。
//! 具体实现在 infrastructure 层（Firebase REST 客户端、内存实现）

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::NodePath;

/// 后端操作失败
///
/// 对 HTTP 层来说只有一种错误：后端失败。Display 只输出后端的原始信息，
/// 状态码等额外信息通过字段单独记录。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NetworkError(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),
}

impl StoreError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// 后端拒绝时的 HTTP 状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}


/// Hierarchical Store Port
///
/// 单次请求、两种终态（成功 / 失败），无重试、无取消、无超时。
#[async_trait]
pub trait HierarchicalStorePort: Send + Sync {
    /// 读取节点当前值（深拷贝快照）
    ///
    /// 节点不存在时返回 `Value::Null`，不是错误
    async fn read(&self, path: &NodePath) -> Result<Value, StoreError>;

    /// 把 `entries` 的每个顶层键写入 `parent` 的对应子节点
    ///
    /// 未出现的兄弟节点保持不变；`entries` 不做形状校验
    async fn merge(&self, parent: &NodePath, entries: Value) -> Result<(), StoreError>;
}
