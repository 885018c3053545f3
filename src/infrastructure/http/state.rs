//! Application State
//!
//! 所有 Command/Query Handlers 共享同一个后端句柄

use std::sync::Arc;

use crate::application::{
    HierarchicalStorePort, ReadNodeHandler, SaveAttendanceHandler, SaveMainLogHandler,
    SaveProfileHandler, WriteLayout,
};

/// 应用状态
///
/// 后端句柄在进程启动时构造一次，之后只读共享
pub struct AppState {
    // ========== Command Handlers ==========
    pub save_profile_handler: SaveProfileHandler,
    pub save_main_log_handler: SaveMainLogHandler,
    pub save_attendance_handler: SaveAttendanceHandler,

    // ========== Query Handlers ==========
    pub read_node_handler: ReadNodeHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(store: Arc<dyn HierarchicalStorePort>, layout: WriteLayout) -> Self {
        Self {
            save_profile_handler: SaveProfileHandler::new(store.clone()),
            save_main_log_handler: SaveMainLogHandler::new(store.clone(), layout),
            save_attendance_handler: SaveAttendanceHandler::new(store.clone(), layout),

            read_node_handler: ReadNodeHandler::new(store),
        }
    }
}
