//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：档案、主日志、考勤三个子树的写入

mod record_commands;

pub mod handlers;

pub use record_commands::*;
