//! Node Queries

use crate::domain::NodePath;

/// 读取任意节点
#[derive(Debug, Clone)]
pub struct ReadNode {
    pub path: NodePath,
}
