//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（HierarchicalStore）
//! - commands: CQRS 命令及处理器（档案 / 主日志 / 考勤写入）
//! - queries: CQRS 查询及处理器（节点读取）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{SaveAttendanceHandler, SaveMainLogHandler, SaveProfileHandler},
    SaveAttendance, SaveMainLog, SaveProfile, WriteLayout,
};

pub use error::ApplicationError;

pub use ports::{HierarchicalStorePort, StoreError};

pub use queries::{handlers::ReadNodeHandler, ReadNode};
