//! Node Query Handlers

use serde_json::Value;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::HierarchicalStorePort;
use crate::application::queries::ReadNode;

/// ReadNode Handler
pub struct ReadNodeHandler {
    store: Arc<dyn HierarchicalStorePort>,
}

impl ReadNodeHandler {
    pub fn new(store: Arc<dyn HierarchicalStorePort>) -> Self {
        Self { store }
    }

    /// 节点不存在时返回 `Value::Null`
    pub async fn handle(&self, query: ReadNode) -> Result<Value, ApplicationError> {
        let value = self.store.read(&query.path).await?;
        Ok(value)
    }
}
