//! Store Context - 浅合并补丁
//!
//! 一次写入 = 父节点 + 顶层键值。后端对每个顶层键执行创建或覆盖，
//! 未出现在补丁中的兄弟节点保持不变。键中可以包含 `/`，
//! 表示父节点下更深一层的目标（多路径更新）。

use serde_json::{Map, Value};

use super::value_objects::{NodePath, SubTree};

#[derive(Debug, Clone, PartialEq)]
pub struct MergePatch {
    parent: NodePath,
    entries: Value,
}

impl MergePatch {
    /// 请求体的顶层键直接成为父节点的子节点
    ///
    /// 请求体原样转发；非对象的请求体由后端决定是否拒绝
    pub fn flat(target: SubTree, body: Value) -> Self {
        Self {
            parent: target.path(),
            entries: body,
        }
    }

    /// 请求体写到父节点下的 `key` 子节点
    ///
    /// 对象请求体按字段展开为 `key/field`，同一 key 的后续写入只覆盖同名字段；
    /// 其余请求体，以及字段名为空或含 `/` 的对象，作为 `key` 的整体值写入，
    /// 由后端的键校验决定是否拒绝。
    pub fn keyed(target: SubTree, key: &str, body: Value) -> Self {
        let entries = match body {
            Value::Object(fields) if fields.keys().all(|f| is_plain_field(f)) => Value::Object(
                fields
                    .into_iter()
                    .map(|(field, value)| (format!("{}/{}", key, field), value))
                    .collect(),
            ),
            other => {
                let mut map = Map::new();
                map.insert(key.to_string(), other);
                Value::Object(map)
            }
        };

        Self {
            parent: target.path(),
            entries,
        }
    }

    pub fn parent(&self) -> &NodePath {
        &self.parent
    }

    pub fn entries(&self) -> &Value {
        &self.entries
    }

    pub fn into_parts(self) -> (NodePath, Value) {
        (self.parent, self.entries)
    }
}

/// 只有单段字段名才能安全地展开为 `key/field`
fn is_plain_field(field: &str) -> bool {
    !field.is_empty() && !field.contains('/')
}
