//! Record HTTP Handlers - 档案 / 主日志 / 考勤写入
//!
//! 请求体不做校验，原样交给后端合并；成功与失败都返回固定纯文本

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::application::{SaveAttendance, SaveMainLog, SaveProfile};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub const PROFILE_SAVED: &str = "Data saved successfully.";
pub const PROFILE_NOT_SAVED: &str = "Data could not be saved.";
pub const LOG_SAVED: &str = "Log data saved successfully.";
pub const LOG_NOT_SAVED: &str = "Log data could not be saved.";
pub const ATTENDANCE_SAVED: &str = "Attendance data saved successfully.";
pub const ATTENDANCE_NOT_SAVED: &str = "Attendance data could not be saved.";

/// 保存档案到 `mines/Profiles/<profile_id>`
pub async fn save_profile(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let command = SaveProfile {
        profile_id: profile_id.clone(),
        body,
    };

    state
        .save_profile_handler
        .handle(command)
        .await
        .map_err(|e| ApiError::save(PROFILE_NOT_SAVED, e))?;

    tracing::info!(profile_id = %profile_id, "{}", PROFILE_SAVED);
    Ok((StatusCode::OK, PROFILE_SAVED))
}

/// 保存主日志到 `mines/MainLogs`
pub async fn save_main_log(
    State(state): State<Arc<AppState>>,
    Path(log_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let command = SaveMainLog {
        log_id: log_id.clone(),
        body,
    };

    state
        .save_main_log_handler
        .handle(command)
        .await
        .map_err(|e| ApiError::save(LOG_NOT_SAVED, e))?;

    tracing::info!(log_id = %log_id, "{}", LOG_SAVED);
    Ok((StatusCode::OK, LOG_SAVED))
}

/// 保存考勤到 `mines/attendance`
pub async fn save_attendance(
    State(state): State<Arc<AppState>>,
    Path((date, worker_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let command = SaveAttendance {
        date: date.clone(),
        worker_id: worker_id.clone(),
        body,
    };

    state
        .save_attendance_handler
        .handle(command)
        .await
        .map_err(|e| ApiError::save(ATTENDANCE_NOT_SAVED, e))?;

    tracing::info!(date = %date, worker_id = %worker_id, "{}", ATTENDANCE_SAVED);
    Ok((StatusCode::OK, ATTENDANCE_SAVED))
}
