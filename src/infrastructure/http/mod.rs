//! HTTP Layer - RESTful API
//!
//! 读取任意节点，写入档案 / 主日志 / 考勤子树

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
