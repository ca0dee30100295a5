//! Payment configuration (Stripe)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::payment::FeePercent;

use super::error::ValidationError;
use super::server::is_http_url;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub secret_key: SecretString,

    /// Stripe webhook signing secret
    pub webhook_secret: SecretString,

    /// Platform fee, percent of the payment amount
    #[serde(default = "default_platform_fee_percent")]
    pub platform_fee_percent: f64,

    /// Where Stripe sends the client after a completed checkout
    pub success_url: String,

    /// Where Stripe sends the client after an abandoned checkout
    pub cancel_url: String,

    /// Override for the Stripe API base URL
    pub api_base_url: Option<String>,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.expose_secret().starts_with("sk_test_")
    }

    pub fn fee_percent(&self) -> Result<FeePercent, ValidationError> {
        FeePercent::new(self.platform_fee_percent).map_err(|_| ValidationError::InvalidFeePercent)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret_key = self.secret_key.expose_secret();
        let webhook_secret = self.webhook_secret.expose_secret();
        if secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE__SECRET_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE__WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !secret_key.starts_with("sk_") && !secret_key.starts_with("rk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        self.fee_percent()?;

        if !is_http_url(&self.success_url) {
            return Err(ValidationError::InvalidUrl("STRIPE__SUCCESS_URL"));
        }
        if !is_http_url(&self.cancel_url) {
            return Err(ValidationError::InvalidUrl("STRIPE__CANCEL_URL"));
        }
        Ok(())
    }
}

fn default_platform_fee_percent() -> f64 {
    10.0
}
