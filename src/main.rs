//! minelink - 远程层级数据库的 HTTP 门面
//!
//! - GET  /data/*path                  读取任意节点
//! - POST /profiles/:profile_id        写入档案
//! - POST /mainlogs/:log_id            写入主日志
//! - POST /attendance/:date/:worker_id 写入考勤

use std::sync::Arc;

use minelink::application::WriteLayout;
use minelink::config::{load_config, print_config, LogConfig};
use minelink::infrastructure::adapters::{Credentials, FirebaseRestClient, FirebaseRestClientConfig};
use minelink::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("minelink - hierarchical store HTTP facade");
    print_config(&config);

    // 后端句柄：进程内只构造一次
    let credentials = Credentials::resolve(&config.database)?;
    tracing::info!(credentials = credentials.kind(), "Database credentials resolved");

    let store = Arc::new(FirebaseRestClient::new(
        FirebaseRestClientConfig::new(&config.database.url),
        credentials,
    )?);

    let layout = WriteLayout::from_nest_by_id(config.records.nest_by_id);
    let state = AppState::new(store, layout);

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes);
    let server = HttpServer::new(server_config, state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},minelink={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
