//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 远程数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 子树写入配置
    #[serde(default)]
    pub records: RecordsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON 请求体最大字节数
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_body_bytes() -> usize {
    100 * 1024 // 100 KiB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 远程数据库配置
///
/// 凭据来源（按优先级）：内联服务账号字段 > 服务账号密钥文件 > 数据库密钥 > 匿名
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库 URL，例如 `https://<project>-default-rtdb.firebaseio.com`
    #[serde(default)]
    pub url: String,

    /// 服务账号密钥文件（JSON）
    #[serde(default = "default_credentials_file")]
    pub credentials_file: Option<PathBuf>,

    /// 内联服务账号：项目 ID
    #[serde(default)]
    pub project_id: Option<String>,

    /// 内联服务账号：client email
    #[serde(default)]
    pub client_email: Option<String>,

    /// 内联服务账号：PEM 私钥，字面量 `\n` 会被还原为换行
    #[serde(default)]
    pub private_key: Option<String>,

    /// 旧版数据库密钥
    #[serde(default)]
    pub secret: Option<String>,
}

fn default_credentials_file() -> Option<PathBuf> {
    Some(PathBuf::from("serviceAccountKey.json"))
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            credentials_file: default_credentials_file(),
            project_id: None,
            client_email: None,
            private_key: None,
            secret: None,
        }
    }
}

impl DatabaseConfig {
    /// 已设置的内联服务账号字段个数（0..=3）
    pub fn inline_fields_set(&self) -> usize {
        [&self.project_id, &self.client_email, &self.private_key]
            .iter()
            .filter(|f| f.as_deref().is_some_and(|v| !v.is_empty()))
            .count()
    }
}

// 私钥与密钥不进日志
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("credentials_file", &self.credentials_file)
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// 子树写入配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RecordsConfig {
    /// 主日志与考勤是否按路由参数嵌套写入
    /// 默认关闭：请求体直接合并到父节点
    #[serde(default)]
    pub nest_by_id: bool,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
