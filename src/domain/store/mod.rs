//! Store Context - 远程层级数据库的领域模型
//!
//! - NodePath: 斜杠分隔的节点路径（原样转发，不做校验）
//! - SubTree: 固定的写入父节点（Profiles / MainLogs / attendance）
//! - MergePatch: 一次浅合并写入

mod merge_patch;
mod value_objects;

pub use merge_patch::MergePatch;
pub use value_objects::{NodePath, SubTree};
