//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::StoreError;

/// 应用层错误
///
/// 唯一的失败原因是后端操作失败，错误信息原样透传
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Backend(#[from] StoreError),
}

impl ApplicationError {
    /// 后端附带的错误信息
    pub fn details(&self) -> String {
        match self {
            ApplicationError::Backend(e) => e.to_string(),
        }
    }

    /// 后端拒绝时的状态码，只用于日志
    pub fn status(&self) -> Option<u16> {
        match self {
            ApplicationError::Backend(e) => e.status(),
        }
    }
}
