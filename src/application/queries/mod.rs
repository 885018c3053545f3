//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：读取任意节点

mod node_queries;

pub mod handlers;

pub use node_queries::*;
