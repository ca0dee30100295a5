//! Chat configuration (Stream)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub api_key: String,
    /// Signs server and user tokens
    pub api_secret: SecretString,
    pub api_base_url: Option<String>,
}

impl ChatConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STREAM__API_KEY"));
        }
        if self.api_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("STREAM__API_SECRET"));
        }
        Ok(())
    }
}
