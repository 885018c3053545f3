//! Firebase Realtime Database REST Client
//!
//! 实现 HierarchicalStorePort，通过 REST API 访问远程数据库
//!
//! REST API:
//! - GET   {url}/{path}.json                 读取节点（不存在时返回 null）
//! - PATCH {url}/{path}.json?print=silent    浅合并（成功返回 204）
//!
//! 鉴权：服务账号走 `Authorization: Bearer`，数据库密钥走 `auth` 查询参数

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde_json::Value;
use thiserror::Error;

use super::credentials::{CredentialError, Credentials};
use super::token_provider::ServiceAccountTokenProvider;
use crate::application::ports::{HierarchicalStorePort, StoreError};
use crate::domain::NodePath;

/// 客户端初始化错误
#[derive(Debug, Error)]
pub enum FirebaseInitError {
    #[error("Invalid database URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// REST 客户端配置
#[derive(Debug, Clone)]
pub struct FirebaseRestClientConfig {
    /// 数据库 URL，例如 `https://<project>-default-rtdb.firebaseio.com`
    pub database_url: String,
}

impl FirebaseRestClientConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

enum RequestAuth {
    Bearer(ServiceAccountTokenProvider),
    Secret(String),
    Anonymous,
}

/// Firebase REST 客户端
///
/// 进程启动时构造一次，通过 `Arc` 在所有请求间共享
pub struct FirebaseRestClient {
    client: Client,
    base_url: Url,
    auth: RequestAuth,
}

impl FirebaseRestClient {
    /// 创建客户端
    ///
    /// 不设置请求超时，完全依赖后端自身的超时行为
    pub fn new(
        config: FirebaseRestClientConfig,
        credentials: Credentials,
    ) -> Result<Self, FirebaseInitError> {
        let base_url = Url::parse(config.database_url.trim()).map_err(|e| {
            FirebaseInitError::InvalidUrl {
                url: config.database_url.clone(),
                reason: e.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FirebaseInitError::InvalidUrl {
                url: config.database_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .build()
            .map_err(|e| FirebaseInitError::Client(e.to_string()))?;

        let auth = match credentials {
            Credentials::ServiceAccount(key) => {
                RequestAuth::Bearer(ServiceAccountTokenProvider::new(client.clone(), key)?)
            }
            Credentials::DatabaseSecret(secret) => RequestAuth::Secret(secret),
            Credentials::Anonymous => RequestAuth::Anonymous,
        };

        tracing::info!(
            url = %base_url,
            auth = auth.kind(),
            "Firebase REST client initialized"
        );

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// 节点 URL：每段单独编码，最后一段追加 `.json`
    fn node_url(&self, path: &NodePath) -> Result<Url, StoreError> {
        let mut segments: Vec<String> = path.segments().map(str::to_string).collect();
        match segments.last_mut() {
            Some(last) => last.push_str(".json"),
            None => segments.push(".json".to_string()),
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::NetworkError(format!("Invalid database URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments.iter());
        Ok(url)
    }

    async fn request(
        &self,
        method: Method,
        path: &NodePath,
        silent: bool,
    ) -> Result<RequestBuilder, StoreError> {
        let mut url = self.node_url(path)?;
        if silent {
            url.query_pairs_mut().append_pair("print", "silent");
        }

        match &self.auth {
            RequestAuth::Bearer(provider) => {
                let token = provider.access_token().await?;
                Ok(self.client.request(method, url).bearer_auth(token))
            }
            RequestAuth::Secret(secret) => {
                url.query_pairs_mut().append_pair("auth", secret);
                Ok(self.client.request(method, url))
            }
            RequestAuth::Anonymous => Ok(self.client.request(method, url)),
        }
    }
}

impl RequestAuth {
    fn kind(&self) -> &'static str {
        match self {
            RequestAuth::Bearer(_) => "service_account",
            RequestAuth::Secret(_) => "database_secret",
            RequestAuth::Anonymous => "anonymous",
        }
    }
}

fn send_error(e: reqwest::Error) -> StoreError {
    if e.is_connect() {
        StoreError::NetworkError(format!("Cannot connect to database: {}", e))
    } else {
        StoreError::NetworkError(e.to_string())
    }
}

/// 非 2xx 响应转换为 Rejected，优先取响应体中的 `error` 字段
async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

    Err(StoreError::rejected(status.as_u16(), message))
}

#[async_trait]
impl HierarchicalStorePort for FirebaseRestClient {
    async fn read(&self, path: &NodePath) -> Result<Value, StoreError> {
        tracing::debug!(path = %path, "Reading node");

        let response = self
            .request(Method::GET, path, false)
            .await?
            .send()
            .await
            .map_err(send_error)?;
        let response = ensure_success(response).await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to decode node: {}", e)))
    }

    async fn merge(&self, parent: &NodePath, entries: Value) -> Result<(), StoreError> {
        tracing::debug!(parent = %parent, "Merging into node");

        let response = self
            .request(Method::PATCH, parent, true)
            .await?
            .json(&entries)
            .send()
            .await
            .map_err(send_error)?;
        ensure_success(response).await?;

        Ok(())
    }
}
