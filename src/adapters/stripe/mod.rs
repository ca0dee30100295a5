//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe integration, including:
//! - One-off payment checkout sessions
//! - Webhook signature verification and event decoding
//!
//! # Security
//!
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - Timestamps are validated to prevent replay attacks (5-minute window)
//! - All secrets are handled via `secrecy::SecretString`

mod mock_payment_provider;
mod stripe_adapter;
mod webhook_types;

pub use mock_payment_provider::{MockPaymentProvider, MOCK_WEBHOOK_SECRET};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter, DEFAULT_API_BASE_URL};
pub use webhook_types::{
    decode_payment_event, StripeCheckoutSession, StripePaymentIntent, StripeWebhookEvent,
    PAYMENT_ID_METADATA_KEY,
};
