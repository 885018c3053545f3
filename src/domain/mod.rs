//! Domain Layer - 领域层
//!
//! Store Context: 远程层级数据库的路径、固定子树与合并补丁

pub mod store;

pub use store::{MergePatch, NodePath, SubTree};
