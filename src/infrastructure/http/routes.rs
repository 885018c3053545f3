//! HTTP Routes
//!
//! API Endpoints:
//! - /ping                           GET   健康检查
//! - /data/*path                     GET   读取任意节点
//! - /profiles/:profile_id           POST  写入档案
//! - /mainlogs/:log_id               POST  写入主日志
//! - /attendance/:date/:worker_id    POST  写入考勤

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/data/*path", get(handlers::get_data))
        .merge(record_routes())
}

/// 子树写入路由
fn record_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles/:profile_id", post(handlers::save_profile))
        .route("/mainlogs/:log_id", post(handlers::save_main_log))
        .route("/attendance/:date/:worker_id", post(handlers::save_attendance))
}
