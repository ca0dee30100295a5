//! Stripe-specific types for webhook handling.
//!
//! These types represent Stripe API objects as they arrive in webhook payloads
//! and API responses. Only the fields reconciliation reads are modelled;
//! everything else Stripe sends is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::payment::PaymentWebhookError;
use crate::ports::{PaymentEvent, PaymentEventKind};

/// Metadata key correlating Stripe objects with local payments.
pub const PAYMENT_ID_METADATA_KEY: &str = "payment_id";

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Event Types
// ════════════════════════════════════════════════════════════════════════════════

/// Raw Stripe webhook event as received from the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeWebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    #[serde(default)]
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: StripeEventData,

    /// Whether this is a live or test event.
    #[serde(default)]
    pub livemode: bool,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Object Types
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Hosted checkout page; absent once the session is complete or expired.
    pub url: Option<String>,

    /// Payment intent created for the session (payment mode).
    pub payment_intent: Option<String>,

    /// Custom metadata attached to the session.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Stripe PaymentIntent object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePaymentIntent {
    /// Unique intent identifier (pi_...).
    pub id: String,

    /// Custom metadata attached to the intent.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Error envelope returned by the Stripe API.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

fn metadata_payment_id(metadata: &HashMap<String, String>) -> Option<String> {
    metadata
        .get(PAYMENT_ID_METADATA_KEY)
        .filter(|id| !id.is_empty())
        .cloned()
}

/// Decodes a verified webhook body into a [`PaymentEvent`].
///
/// The event object is only decoded for event types reconciliation handles;
/// unknown types pass through with no correlation data.
pub fn decode_payment_event(payload: &[u8]) -> Result<PaymentEvent, PaymentWebhookError> {
    let event: StripeWebhookEvent = serde_json::from_slice(payload)
        .map_err(|e| PaymentWebhookError::MalformedPayload(format!("invalid event: {}", e)))?;

    let kind = PaymentEventKind::parse(&event.event_type);
    let (payment_id, payment_intent_id) = match kind {
        PaymentEventKind::CheckoutSessionCompleted => {
            let session: StripeCheckoutSession = serde_json::from_value(event.data.object)
                .map_err(|e| {
                    PaymentWebhookError::MalformedPayload(format!(
                        "invalid checkout session payload: {}",
                        e
                    ))
                })?;
            (metadata_payment_id(&session.metadata), session.payment_intent)
        }
        PaymentEventKind::PaymentIntentSucceeded | PaymentEventKind::PaymentIntentFailed => {
            let intent: StripePaymentIntent = serde_json::from_value(event.data.object)
                .map_err(|e| {
                    PaymentWebhookError::MalformedPayload(format!(
                        "invalid payment intent payload: {}",
                        e
                    ))
                })?;
            (metadata_payment_id(&intent.metadata), Some(intent.id))
        }
        PaymentEventKind::Unknown(_) => (None, None),
    };

    Ok(PaymentEvent {
        id: event.id,
        kind,
        payment_id,
        payment_intent_id,
    })
}
