//! In-Memory Hierarchical Store Implementation
//!
//! 以单棵 JSON 树模拟远程层级数据库：
//! - 空对象与 null 不占据节点（写入 null 即删除）
//! - 合并补丁的键可以是多段路径
//! - 键中的 `.` `$` `#` `[` `]` 被拒绝，与远程后端一致
//! - 写入值内部的键不能为空，也不能包含 `/`
//!
//! 支持注入失败，便于验证错误路径。

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::{PoisonError, RwLock};

use crate::application::ports::{HierarchicalStorePort, StoreError};
use crate::domain::NodePath;

const FORBIDDEN_KEY_CHARS: &[char] = &['.', '$', '#', '[', ']'];

/// 内存层级存储
pub struct InMemoryStore {
    root: RwLock<Value>,
    failure: RwLock<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_data(Value::Null)
    }

    /// 以给定的树作为初始数据
    pub fn with_data(mut data: Value) -> Self {
        if prune(&mut data) {
            data = Value::Null;
        }
        Self {
            root: RwLock::new(data),
            failure: RwLock::new(None),
        }
    }

    /// 之后的所有操作都以给定信息失败，直到调用 `recover`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    pub fn recover(&self) {
        *self.failure.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// 整棵树的快照
    pub fn snapshot(&self) -> Value {
        self.root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        let failure = self.failure.read().unwrap_or_else(PoisonError::into_inner);
        match failure.as_ref() {
            Some(message) => Err(StoreError::rejected(500, message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HierarchicalStorePort for InMemoryStore {
    async fn read(&self, path: &NodePath) -> Result<Value, StoreError> {
        self.check_failure()?;
        validate_path(path)?;

        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        let mut node = &*root;
        for segment in path.segments() {
            match child(node, segment) {
                Some(next) => node = next,
                None => return Ok(Value::Null),
            }
        }

        tracing::debug!(path = %path, "InMemoryStore: read");
        Ok(node.clone())
    }

    async fn merge(&self, parent: &NodePath, entries: Value) -> Result<(), StoreError> {
        self.check_failure()?;
        validate_path(parent)?;

        let Value::Object(entries) = entries else {
            return Err(StoreError::rejected(
                400,
                "Invalid data; couldn't parse JSON object.",
            ));
        };

        // 先校验全部键，保证补丁要么全部生效要么全部不生效
        let targets = entries
            .keys()
            .map(|key| {
                let target = parent.child(key);
                if key.split('/').any(str::is_empty) {
                    return Err(StoreError::rejected(400, "Invalid path: empty key"));
                }
                validate_path(&target)?;
                Ok(target)
            })
            .collect::<Result<Vec<_>, _>>()?;
        for value in entries.values() {
            validate_value_keys(value)?;
        }

        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        for (target, (_, value)) in targets.iter().zip(entries) {
            let segments: Vec<&str> = target.segments().collect();
            set_at(&mut root, &segments, value);
        }
        if prune(&mut root) {
            *root = Value::Null;
        }

        tracing::debug!(parent = %parent, keys = targets.len(), "InMemoryStore: merged");
        Ok(())
    }
}

fn validate_path(path: &NodePath) -> Result<(), StoreError> {
    let invalid = path
        .segments()
        .any(|s| s.contains(FORBIDDEN_KEY_CHARS) || s.chars().any(char::is_control));
    if invalid {
        return Err(StoreError::rejected(400, "Invalid path: Invalid token in path"));
    }
    Ok(())
}

/// 写入值内部的键必须是合法的单段键
fn validate_value_keys(value: &Value) -> Result<(), StoreError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let invalid = key.is_empty()
                    || key.contains('/')
                    || key.contains(FORBIDDEN_KEY_CHARS)
                    || key.chars().any(char::is_control);
                if invalid {
                    return Err(StoreError::rejected(
                        400,
                        format!("Invalid data; invalid key {:?}", key),
                    ));
                }
                validate_value_keys(child)?;
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(validate_value_keys),
        _ => Ok(()),
    }
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn set_at(node: &mut Value, segments: &[&str], value: Value) {
    match segments.split_first() {
        None => *node = value,
        Some((head, rest)) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Value::Object(map) = node {
                let next = map.entry(head.to_string()).or_insert(Value::Null);
                set_at(next, rest, value);
            }
        }
    }
}

/// 删除 null 与空对象，返回节点自身是否为空
fn prune(node: &mut Value) -> bool {
    match node {
        Value::Null => true,
        Value::Object(map) => {
            map.retain(|_, child| !prune(child));
            map.is_empty()
        }
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> NodePath {
        NodePath::new(raw)
    }

    #[tokio::test]
    async fn test_read_missing_is_null() {
        let store = InMemoryStore::new();
        assert_eq!(store.read(&path("a/b")).await.unwrap(), Value::Null);
        assert_eq!(store.read(&NodePath::root()).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_merge_keeps_siblings() {
        let store = InMemoryStore::with_data(json!({"p": {"a": 1, "b": 2}}));
        store.merge(&path("p"), json!({"b": 3, "c": 4})).await.unwrap();
        assert_eq!(store.snapshot(), json!({"p": {"a": 1, "b": 3, "c": 4}}));
    }

    #[tokio::test]
    async fn test_merge_replaces_named_child_entirely() {
        let store = InMemoryStore::with_data(json!({"p": {"a": {"x": 1, "y": 2}}}));
        store.merge(&path("p"), json!({"a": {"x": 9}})).await.unwrap();
        assert_eq!(store.snapshot(), json!({"p": {"a": {"x": 9}}}));
    }

    #[tokio::test]
    async fn test_multi_segment_keys_write_deep() {
        let store = InMemoryStore::with_data(json!({"p": {"a": {"x": 1}}}));
        store.merge(&path("p"), json!({"a/y": 2})).await.unwrap();
        assert_eq!(store.snapshot(), json!({"p": {"a": {"x": 1, "y": 2}}}));
    }

    #[tokio::test]
    async fn test_null_deletes_and_prunes_parents() {
        let store = InMemoryStore::with_data(json!({"p": {"a": 1}}));
        store.merge(&path("p"), json!({"a": null})).await.unwrap();
        assert_eq!(store.snapshot(), Value::Null);
        assert_eq!(store.read(&path("p")).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_non_object_patch_rejected() {
        let store = InMemoryStore::new();
        let err = store.merge(&path("p"), json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 400, .. }));
        assert_eq!(store.snapshot(), Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_key_rejects_whole_patch() {
        let store = InMemoryStore::new();
        let err = store
            .merge(&path("p"), json!({"ok": 1, "bad.key": 2}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 400, .. }));
        assert_eq!(store.snapshot(), Value::Null);
    }

    #[tokio::test]
    async fn test_empty_or_nested_keys_in_value_rejected() {
        let store = InMemoryStore::with_data(json!({"p": {"abc": {"name": "x"}}}));

        for entries in [
            json!({"abc": {"": null}}),
            json!({"abc": {"x/y": 1}}),
            json!({"abc/": null}),
        ] {
            let err = store.merge(&path("p"), entries).await.unwrap_err();
            assert!(matches!(err, StoreError::Rejected { status: 400, .. }));
        }
        assert_eq!(store.snapshot(), json!({"p": {"abc": {"name": "x"}}}));
    }

    #[tokio::test]
    async fn test_invalid_read_path_rejected() {
        let store = InMemoryStore::new();
        assert!(store.read(&path("a/$b")).await.is_err());
    }

    #[tokio::test]
    async fn test_array_index_read() {
        let store = InMemoryStore::with_data(json!({"list": ["x", "y"]}));
        assert_eq!(store.read(&path("list/1")).await.unwrap(), json!("y"));
    }

    #[tokio::test]
    async fn test_injected_failure_and_recovery() {
        let store = InMemoryStore::new();
        store.fail_with("boom");
        assert!(store.read(&path("a")).await.is_err());
        assert!(store.merge(&path("a"), json!({"b": 1})).await.is_err());

        store.recover();
        store.merge(&path("a"), json!({"b": 1})).await.unwrap();
        assert_eq!(store.read(&path("a/b")).await.unwrap(), json!(1));
    }
}
