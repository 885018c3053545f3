//! minelink - 远程层级数据库的 HTTP 门面
//!
//! 架构设计: Hexagonal Architecture + CQRS
//!
//! 领域层 (domain/):
//! - Store Context: 节点路径、固定子树、浅合并补丁
//!
//! 应用层 (application/):
//! - Ports: HierarchicalStorePort
//! - Commands: 档案 / 主日志 / 考勤写入
//! - Queries: 节点读取
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: axum 路由、错误映射、日志中间件
//! - Adapters: Firebase Realtime Database REST 客户端（服务账号 / 数据库密钥）
//! - Memory: 内存层级存储（本地开发与测试）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
