//! Stream Chat server-side client.
//!
//! Implements the `MessagingProvider` port against the Stream Chat REST API.
//! Server requests authenticate with an HS256 JWT carrying `{"server": true}`
//! signed by the API secret, plus the API key as a query parameter.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::foundation::UserId;
use crate::domain::marketplace::ChannelId;
use crate::ports::{MessagingProvider, ProviderError, ProviderErrorCode};

/// Default Stream Chat API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://chat.stream-io-api.com";

/// Outbound request deadline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Stream Chat configuration.
#[derive(Clone)]
pub struct StreamConfig {
    api_key: String,
    api_secret: SecretString,
    api_base_url: String,
}

impl StreamConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::new(api_secret.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ServerClaims {
    server: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct UserClaims {
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct StreamErrorResponse {
    code: Option<i64>,
    message: Option<String>,
}

/// Stream Chat messaging provider adapter.
pub struct StreamClient {
    config: StreamConfig,
    http_client: reqwest::Client,
}

impl StreamClient {
    pub fn new(config: StreamConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(config, http_client))
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_client(config: StreamConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, ProviderError> {
        let key = EncodingKey::from_secret(self.config.api_secret.expose_secret().as_bytes());
        encode(&Header::default(), claims, &key)
            .map_err(|e| ProviderError::authentication(format!("failed to sign token: {}", e)))
    }

    fn server_token(&self) -> Result<String, ProviderError> {
        self.sign(&ServerClaims { server: true })
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<(), ProviderError> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let response = self
            .http_client
            .post(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .header("Stream-Auth-Type", "jwt")
            .header("Authorization", self.server_token()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::timeout(format!("stream request timed out: {}", e))
                } else {
                    ProviderError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &text))
    }
}

fn map_api_error(status: StatusCode, body: &str) -> ProviderError {
    let parsed = serde_json::from_str::<StreamErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|r| r.message.clone())
        .unwrap_or_else(|| format!("Stream API error (status {})", status.as_u16()));

    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderErrorCode::AuthenticationError,
        StatusCode::TOO_MANY_REQUESTS => ProviderErrorCode::RateLimitExceeded,
        s if s.is_client_error() => ProviderErrorCode::InvalidRequest,
        _ => ProviderErrorCode::ProviderError,
    };

    let mut error = ProviderError::new(code, message);
    if let Some(provider_code) = parsed.and_then(|r| r.code) {
        error = error.with_provider_code(provider_code.to_string());
    }
    error
}

fn upsert_users_body(user_ids: &[UserId]) -> serde_json::Value {
    let users: serde_json::Map<String, serde_json::Value> = user_ids
        .iter()
        .map(|id| (id.to_string(), json!({ "id": id.as_str() })))
        .collect();
    json!({ "users": users })
}

fn create_channel_body(created_by: &UserId, members: &[UserId]) -> serde_json::Value {
    let members: Vec<&str> = members.iter().map(UserId::as_str).collect();
    json!({
        "data": {
            "created_by_id": created_by.as_str(),
            "members": members,
        }
    })
}

#[async_trait]
impl MessagingProvider for StreamClient {
    async fn upsert_users(&self, user_ids: &[UserId]) -> Result<(), ProviderError> {
        self.post("/users", upsert_users_body(user_ids)).await
    }

    async fn create_channel(
        &self,
        channel_type: &str,
        channel_id: &ChannelId,
        created_by: &UserId,
        members: &[UserId],
    ) -> Result<(), ProviderError> {
        let path = format!("/channels/{}/{}/query", channel_type, channel_id);
        self.post(&path, create_channel_body(created_by, members)).await
    }

    fn create_user_token(&self, user_id: &UserId) -> Result<String, ProviderError> {
        self.sign(&UserClaims {
            user_id: user_id.to_string(),
        })
    }
}
