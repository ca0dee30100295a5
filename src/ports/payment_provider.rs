//! Payment provider port for hosted checkout and webhook intake.
//!
//! The provider owns card collection. This system only opens a hosted
//! checkout session and later learns the outcome through signed webhooks,
//! correlated by the `payment_id` metadata attached here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PaymentId, ProjectId, UserId};
use crate::domain::payment::{FeePercent, PaymentStatus, PaymentWebhookError};

use super::ProviderError;

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session for a single payment.
    ///
    /// Returns a URL for the client to complete payment.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, ProviderError>;

    /// Verify a webhook signature against the raw payload and decode the event.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` if the signature or its timestamp does not check out
    /// - `MalformedPayload` if the verified body is not a decodable event
    fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
        now: i64,
    ) -> Result<PaymentEvent, PaymentWebhookError>;
}

/// Request to open a checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Local payment record; echoed back in webhook metadata.
    pub payment_id: PaymentId,
    pub client_id: UserId,
    pub freelancer_id: UserId,
    pub project_id: ProjectId,

    /// Line item name.
    pub project_title: String,

    /// Amount in minor currency units.
    pub amount: i64,

    /// Lowercase ISO 4217 code.
    pub currency: String,

    pub platform_fee_percent: FeePercent,
    pub platform_fee_amount: i64,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for the client to complete checkout.
    pub url: String,
}

/// Webhook event from the payment provider, reduced to what reconciliation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEvent {
    /// Event ID from provider.
    pub id: String,

    pub kind: PaymentEventKind,

    /// `payment_id` metadata, when the event object carries it.
    pub payment_id: Option<String>,

    /// Payment intent the event refers to, if any.
    pub payment_intent_id: Option<String>,
}

/// Types of webhook events we handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEventKind {
    /// `checkout.session.completed`
    CheckoutSessionCompleted,

    /// `payment_intent.succeeded`
    PaymentIntentSucceeded,

    /// `payment_intent.payment_failed`
    PaymentIntentFailed,

    /// Any other event type, kept verbatim.
    Unknown(String),
}

impl PaymentEventKind {
    pub fn parse(event_type: &str) -> Self {
        match event_type {
            "checkout.session.completed" => PaymentEventKind::CheckoutSessionCompleted,
            "payment_intent.succeeded" => PaymentEventKind::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => PaymentEventKind::PaymentIntentFailed,
            other => PaymentEventKind::Unknown(other.to_string()),
        }
    }

    /// Payment status this event drives the local record to.
    pub fn target_status(&self) -> Option<PaymentStatus> {
        match self {
            PaymentEventKind::CheckoutSessionCompleted | PaymentEventKind::PaymentIntentSucceeded => {
                Some(PaymentStatus::Paid)
            }
            PaymentEventKind::PaymentIntentFailed => Some(PaymentStatus::Failed),
            PaymentEventKind::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentEventKind::CheckoutSessionCompleted => "checkout.session.completed",
            PaymentEventKind::PaymentIntentSucceeded => "payment_intent.succeeded",
            PaymentEventKind::PaymentIntentFailed => "payment_intent.payment_failed",
            PaymentEventKind::Unknown(other) => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn PaymentProvider) {}
    }

    #[test]
    fn event_kinds_map_to_target_status() {
        assert_eq!(
            PaymentEventKind::parse("checkout.session.completed").target_status(),
            Some(PaymentStatus::Paid)
        );
        assert_eq!(
            PaymentEventKind::parse("payment_intent.succeeded").target_status(),
            Some(PaymentStatus::Paid)
        );
        assert_eq!(
            PaymentEventKind::parse("payment_intent.payment_failed").target_status(),
            Some(PaymentStatus::Failed)
        );
        assert_eq!(PaymentEventKind::parse("charge.refunded").target_status(), None);
    }

    #[test]
    fn unknown_kind_keeps_type_string() {
        assert_eq!(PaymentEventKind::parse("charge.refunded").as_str(), "charge.refunded");
    }
}
