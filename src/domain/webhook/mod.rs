//! Webhook authentication.
//!
//! - `signature` - body HMAC + timestamp header scheme (identity provider)
//! - `stripe` - Stripe's `t=...,v1=...` signature header scheme

pub mod signature;
mod stripe;

pub use signature::{SignatureError, MAX_TIMESTAMP_SKEW_SECS};
pub use stripe::{StripeSignatureHeader, StripeWebhookVerifier};

#[cfg(test)]
pub use stripe::sign_for_test as sign_stripe_payload_for_test;
