//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait for Stripe API integration: hosted
//! checkout sessions for one-off payments and webhook verification.
//!
//! # Security
//!
//! - Webhook signatures are checked by [`StripeWebhookVerifier`] (HMAC-SHA256,
//!   constant-time comparison, 5-minute timestamp window)
//! - Secrets handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key, webhook_secret, success_url, cancel_url);
//! let adapter = StripePaymentAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::payment::PaymentWebhookError;
use crate::domain::webhook::StripeWebhookVerifier;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentEvent, PaymentProvider, ProviderError,
    ProviderErrorCode,
};

use super::webhook_types::{
    decode_payment_event, StripeCheckoutSession, StripeErrorResponse, PAYMENT_ID_METADATA_KEY,
};

/// Default Stripe API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Outbound request deadline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Redirect after successful checkout.
    success_url: String,

    /// Redirect after abandoned checkout.
    cancel_url: String,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(
        api_key: impl Into<String>,
        webhook_secret: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    verifier: StripeWebhookVerifier,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(config, http_client))
    }

    /// Create an adapter sharing an existing HTTP client.
    pub fn with_client(config: StripeConfig, http_client: reqwest::Client) -> Self {
        let verifier = StripeWebhookVerifier::new(config.webhook_secret.expose_secret().clone());
        Self {
            config,
            verifier,
            http_client,
        }
    }

    /// Form parameters for a one-off payment checkout session.
    fn checkout_params(&self, request: &CreateCheckoutRequest) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("payment_method_types[]".into(), "card".into()),
            ("success_url".into(), self.config.success_url.clone()),
            ("cancel_url".into(), self.config.cancel_url.clone()),
            (
                "line_items[0][price_data][currency]".into(),
                request.currency.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]".into(),
                request.amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                request.project_title.clone(),
            ),
            ("line_items[0][quantity]".into(), "1".into()),
        ];

        let metadata = [
            (PAYMENT_ID_METADATA_KEY, request.payment_id.to_string()),
            ("client_id", request.client_id.to_string()),
            ("freelancer_id", request.freelancer_id.to_string()),
            ("project_id", request.project_id.to_string()),
            (
                "platform_fee_percent",
                request.platform_fee_percent.to_string(),
            ),
            (
                "platform_fee_amount",
                request.platform_fee_amount.to_string(),
            ),
            ("currency", request.currency.clone()),
            ("amount", request.amount.to_string()),
        ];
        for (key, value) in metadata {
            params.push((format!("metadata[{}]", key), value));
        }

        params.push((
            format!("payment_intent_data[metadata][{}]", PAYMENT_ID_METADATA_KEY),
            request.payment_id.to_string(),
        ));

        params
    }
}

/// Maps a non-success Stripe response to a provider error.
fn map_api_error(status: StatusCode, body: &str) -> ProviderError {
    let parsed = serde_json::from_str::<StripeErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|r| r.error.message.clone())
        .unwrap_or_else(|| format!("Stripe API error (status {})", status.as_u16()));

    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderErrorCode::AuthenticationError,
        StatusCode::TOO_MANY_REQUESTS => ProviderErrorCode::RateLimitExceeded,
        StatusCode::BAD_REQUEST | StatusCode::PAYMENT_REQUIRED | StatusCode::NOT_FOUND => {
            ProviderErrorCode::InvalidRequest
        }
        _ => ProviderErrorCode::ProviderError,
    };

    let mut error = ProviderError::new(code, message);
    if let Some(provider_code) = parsed.and_then(|r| r.error.code.or(r.error.error_type)) {
        error = error.with_provider_code(provider_code);
    }
    error
}

fn map_transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(format!("Stripe request timed out: {}", err))
    } else {
        ProviderError::network(err.to_string())
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, ProviderError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let params = self.checkout_params(&request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = map_api_error(status, &body);
            tracing::warn!(
                payment_id = %request.payment_id,
                status = status.as_u16(),
                code = %error.code,
                "Stripe rejected checkout session"
            );
            return Err(error);
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            ProviderError::invalid_response(format!("Failed to parse Stripe response: {}", e))
        })?;

        let url = session
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ProviderError::invalid_response("Stripe session has no checkout URL"))?;

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
        now: i64,
    ) -> Result<PaymentEvent, PaymentWebhookError> {
        self.verifier.verify(payload, signature, now).map_err(|e| {
            tracing::warn!(reason = %e, "Stripe webhook signature rejected");
            PaymentWebhookError::from(e)
        })?;
        decode_payment_event(payload)
    }
}
