//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured checkout sessions
//! - Error injection
//! - Call tracking
//! - Slow provider simulation
//! - Real Stripe-scheme webhook verification against a test secret

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::payment::PaymentWebhookError;
use crate::domain::webhook::StripeWebhookVerifier;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentEvent, PaymentProvider, ProviderError,
};

use super::webhook_types::decode_payment_event;

/// Webhook secret the mock verifies against unless configured otherwise.
pub const MOCK_WEBHOOK_SECRET: &str = "whsec_mock";

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Inject errors
/// mock.fail_next_checkout(ProviderError::network("connection reset"));
///
/// // Inspect calls
/// assert_eq!(mock.checkout_requests().len(), 1);
/// ```
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
    verifier: StripeWebhookVerifier,
    delay: Option<Duration>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Checkout session to return instead of a generated one.
    next_checkout: Option<CheckoutSession>,

    /// Error to return on next checkout call.
    next_error: Option<ProviderError>,

    /// Every checkout request received, in order.
    checkout_requests: Vec<CreateCheckoutRequest>,

    /// Counter for generated session ids.
    sessions_created: u32,
}

impl Default for MockPaymentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPaymentProvider {
    /// Create a new mock provider verifying webhooks with [`MOCK_WEBHOOK_SECRET`].
    pub fn new() -> Self {
        Self::with_webhook_secret(MOCK_WEBHOOK_SECRET)
    }

    pub fn with_webhook_secret(secret: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState::default())),
            verifier: StripeWebhookVerifier::new(secret),
            delay: None,
        }
    }

    /// Sleep this long before answering each checkout call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the session to return on the next `create_checkout_session` call.
    pub fn set_checkout(&self, session: CheckoutSession) {
        self.inner.lock().unwrap().next_checkout = Some(session);
    }

    /// Fail the next `create_checkout_session` call with `error`.
    pub fn fail_next_checkout(&self, error: ProviderError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertion Helpers
    // ════════════════════════════════════════════════════════════════════════════

    /// Every checkout request received so far.
    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.inner.lock().unwrap().checkout_requests.clone()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.inner.lock().unwrap();
        state.checkout_requests.push(request);

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        if let Some(session) = state.next_checkout.take() {
            return Ok(session);
        }

        state.sessions_created += 1;
        let id = format!("cs_test_{}", state.sessions_created);
        Ok(CheckoutSession {
            url: format!("https://checkout.stripe.test/c/pay/{}", id),
            id,
        })
    }

    fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
        now: i64,
    ) -> Result<PaymentEvent, PaymentWebhookError> {
        self.verifier.verify(payload, signature, now)?;
        decode_payment_event(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PaymentId, ProjectId, UserId};
    use crate::domain::payment::FeePercent;
    use crate::domain::webhook::sign_stripe_payload_for_test;

    fn request() -> CreateCheckoutRequest {
        CreateCheckoutRequest {
            payment_id: PaymentId::new("pay_1").unwrap(),
            client_id: UserId::new("client_1").unwrap(),
            freelancer_id: UserId::new("freelancer_1").unwrap(),
            project_id: ProjectId::new("project_1").unwrap(),
            project_title: "Logo".to_string(),
            amount: 500,
            currency: "usd".to_string(),
            platform_fee_percent: FeePercent::new(10.0).unwrap(),
            platform_fee_amount: 50,
        }
    }

    #[tokio::test]
    async fn generates_sessions_and_records_requests() {
        let mock = MockPaymentProvider::new();

        let first = mock.create_checkout_session(request()).await.unwrap();
        let second = mock.create_checkout_session(request()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.url.contains(&first.id));
        assert_eq!(mock.checkout_requests().len(), 2);
    }

    #[tokio::test]
    async fn injected_error_is_returned_once() {
        let mock = MockPaymentProvider::new();
        mock.fail_next_checkout(ProviderError::network("connection reset"));

        assert!(mock.create_checkout_session(request()).await.is_err());
        assert!(mock.create_checkout_session(request()).await.is_ok());
    }

    #[test]
    fn verifies_webhooks_with_configured_secret() {
        let mock = MockPaymentProvider::with_webhook_secret("whsec_custom");
        let payload = br#"{"id":"evt_1","type":"charge.refunded","data":{"object":{}}}"#;
        let now = 1_760_000_000;

        let good = sign_stripe_payload_for_test("whsec_custom", now, payload);
        assert!(mock.verify_webhook(payload, &good, now).is_ok());

        let bad = sign_stripe_payload_for_test(MOCK_WEBHOOK_SECRET, now, payload);
        assert!(matches!(
            mock.verify_webhook(payload, &bad, now),
            Err(PaymentWebhookError::InvalidSignature(_))
        ));
    }
}
