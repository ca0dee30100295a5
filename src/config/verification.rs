//! Identity verification configuration (Didit)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::is_http_url;

/// Identity verification configuration (Didit)
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    pub api_key: SecretString,

    pub workflow_id: String,

    /// Secret the provider signs webhook bodies with
    pub webhook_secret: SecretString,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Public base URL the provider calls back on; falls back to `server.public_url`
    pub callback_base_url: Option<String>,
}

impl VerificationConfig {
    /// Resolves the callback base URL, preferring the explicit setting.
    pub fn callback_base_url<'a>(&'a self, public_url: Option<&'a str>) -> Option<&'a str> {
        self.callback_base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .or(public_url)
    }

    pub fn validate(&self, public_url: Option<&str>) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("DIDIT__API_KEY"));
        }
        if self.workflow_id.is_empty() {
            return Err(ValidationError::MissingRequired("DIDIT__WORKFLOW_ID"));
        }
        if self.webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("DIDIT__WEBHOOK_SECRET"));
        }
        if !is_http_url(&self.api_base_url) {
            return Err(ValidationError::InvalidUrl("DIDIT__API_BASE_URL"));
        }
        match self.callback_base_url(public_url) {
            None => Err(ValidationError::MissingRequired("DIDIT__CALLBACK_BASE_URL")),
            Some(url) if !is_http_url(url) => {
                Err(ValidationError::InvalidUrl("DIDIT__CALLBACK_BASE_URL"))
            }
            Some(_) => Ok(()),
        }
    }
}

fn default_api_base_url() -> String {
    "https://verification.didit.me".to_string()
}
