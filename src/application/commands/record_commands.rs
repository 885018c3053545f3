//! Record Commands - 子树写入命令

use serde_json::Value;

/// 路由参数如何参与写入目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteLayout {
    /// 日志与考勤请求体直接合并到父节点，路由参数不参与写入
    #[default]
    Flat,
    /// 日志写到 `<logid>`，考勤写到 `<date>/<workerId>`
    KeyedById,
}

impl WriteLayout {
    pub fn from_nest_by_id(nest_by_id: bool) -> Self {
        if nest_by_id {
            WriteLayout::KeyedById
        } else {
            WriteLayout::Flat
        }
    }
}

/// 保存档案命令
#[derive(Debug, Clone)]
pub struct SaveProfile {
    pub profile_id: String,
    pub body: Value,
}

/// 保存主日志命令
#[derive(Debug, Clone)]
pub struct SaveMainLog {
    pub log_id: String,
    pub body: Value,
}

/// 保存考勤命令
#[derive(Debug, Clone)]
pub struct SaveAttendance {
    pub date: String,
    pub worker_id: String,
    pub body: Value,
}
