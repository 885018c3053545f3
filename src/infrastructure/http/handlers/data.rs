//! Data HTTP Handlers - 读取任意节点

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::ReadNode;
use crate::domain::NodePath;
use crate::infrastructure::http::dto::DataResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 读取节点
///
/// 路径原样转发给后端；不存在的节点返回 `{"data": null}`
pub async fn get_data(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Json<DataResponse>, ApiError> {
    let query = ReadNode {
        path: NodePath::new(path.as_str()),
    };

    let data = state
        .read_node_handler
        .handle(query)
        .await
        .map_err(|e| ApiError::retrieve(path.as_str(), e))?;

    tracing::info!(path = %path, found = !data.is_null(), "Data retrieved");

    Ok(Json(DataResponse { data }))
}
