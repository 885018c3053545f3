//! Service Account Token Provider
//!
//! 用服务账号私钥签发 RS256 JWT，向 OAuth2 token 端点换取访问令牌。
//! 令牌缓存到过期前 60 秒；并发请求在刷新期间等待同一把锁，只刷新一次。

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::credentials::{CredentialError, ServiceAccountKey};
use crate::application::ports::StoreError;

/// Realtime Database 所需的 OAuth2 scope
const TOKEN_SCOPES: &str = "https://www.googleapis.com/auth/firebase.database \
                            https://www.googleapis.com/auth/userinfo.email";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// JWT 断言有效期（秒），Google 允许的最大值
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// 提前刷新的余量（秒）
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    /// Unix 时间戳（秒）
    expires_at: i64,
}

impl CachedToken {
    /// `expires_in` 由 token 端点给出，可能任意大
    fn issued(now: i64, response: TokenResponse) -> Self {
        Self {
            value: response.access_token,
            expires_at: now.saturating_add(response.expires_in),
        }
    }

    fn is_fresh(&self, now: i64) -> bool {
        now + REFRESH_MARGIN_SECS < self.expires_at
    }
}

/// 服务账号访问令牌提供者
pub struct ServiceAccountTokenProvider {
    client: Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenProvider {
    /// 私钥在构造时解析，格式错误在启动阶段暴露
    pub fn new(client: Client, key: ServiceAccountKey) -> Result<Self, CredentialError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| CredentialError::InvalidKey(format!("private_key: {}", e)))?;

        Ok(Self {
            client,
            key,
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    /// 获取有效的访问令牌，必要时刷新
    pub async fn access_token(&self) -> Result<String, StoreError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now().timestamp();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let token = self.fetch(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn sign_assertion(&self, now: i64) -> Result<String, StoreError> {
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: TOKEN_SCOPES.to_string(),
            aud: self.key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| StoreError::AuthError(format!("Failed to sign assertion: {}", e)))
    }

    async fn fetch(&self, now: i64) -> Result<CachedToken, StoreError> {
        let assertion = self.sign_assertion(now)?;

        tracing::debug!(
            token_uri = %self.key.token_uri,
            client_email = %self.key.client_email,
            "Requesting access token"
        );

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::AuthError(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::AuthError(format!(
                "Token endpoint returned HTTP {}: {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::AuthError(format!("Invalid token response: {}", e)))?;

        tracing::info!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "Access token refreshed"
        );

        Ok(CachedToken::issued(now, token))
    }
}
