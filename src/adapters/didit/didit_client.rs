//! Didit identity verification client.
//!
//! Implements the `IdentityProvider` port against Didit's session API:
//! `POST {base}/v2/session/` with the `x-api-key` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{
    CreateVerificationRequest, IdentityProvider, ProviderError, ProviderErrorCode,
    VerificationSession,
};

/// Default Didit API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://verification.didit.me";

/// Outbound request deadline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Didit API configuration.
#[derive(Clone)]
pub struct DiditConfig {
    api_key: SecretString,
    workflow_id: String,
    api_base_url: String,
}

impl DiditConfig {
    pub fn new(api_key: impl Into<String>, workflow_id: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            workflow_id: workflow_id.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Serialize)]
struct CreateSessionBody<'a> {
    workflow_id: &'a str,
    vendor_data: &'a str,
    callback: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct DiditErrorResponse {
    message: Option<String>,
    code: Option<String>,
}

/// Didit identity provider adapter.
pub struct DiditClient {
    config: DiditConfig,
    http_client: reqwest::Client,
}

impl DiditClient {
    pub fn new(config: DiditConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(config, http_client))
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_client(config: DiditConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }
}

fn map_api_error(status: StatusCode, body: &str) -> ProviderError {
    let parsed = serde_json::from_str::<DiditErrorResponse>(body).ok();
    let message = format!(
        "didit api error: status={} message={}",
        status.as_u16(),
        parsed
            .as_ref()
            .and_then(|r| r.message.clone())
            .unwrap_or_else(|| body.trim().to_string())
    );

    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderErrorCode::AuthenticationError,
        StatusCode::TOO_MANY_REQUESTS => ProviderErrorCode::RateLimitExceeded,
        s if s.is_client_error() => ProviderErrorCode::InvalidRequest,
        _ => ProviderErrorCode::ProviderError,
    };

    let mut error = ProviderError::new(code, message);
    if let Some(provider_code) = parsed.and_then(|r| r.code) {
        error = error.with_provider_code(provider_code);
    }
    error
}

fn into_session(response: CreateSessionResponse) -> Result<VerificationSession, ProviderError> {
    if response.session_id.is_empty() || response.url.is_empty() {
        return Err(ProviderError::invalid_response(
            "didit response missing session_id or url",
        ));
    }
    Ok(VerificationSession {
        session_id: response.session_id,
        url: response.url,
    })
}

#[async_trait]
impl IdentityProvider for DiditClient {
    async fn create_verification_session(
        &self,
        request: CreateVerificationRequest,
    ) -> Result<VerificationSession, ProviderError> {
        let url = format!("{}/v2/session/", self.config.api_base_url);
        let body = CreateSessionBody {
            workflow_id: &self.config.workflow_id,
            vendor_data: &request.vendor_data,
            callback: &request.callback_url,
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::timeout(format!("didit request timed out: {}", e))
                } else {
                    ProviderError::network(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::network(e.to_string()))?;

        if !status.is_success() {
            return Err(map_api_error(status, &text));
        }

        let parsed: CreateSessionResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::invalid_response(format!("Failed to parse didit response: {}", e))
        })?;

        let session = into_session(parsed)?;
        tracing::debug!(session_id = %session.session_id, "didit verification session created");
        Ok(session)
    }
}
