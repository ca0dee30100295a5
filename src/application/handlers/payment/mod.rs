//! Payment handlers.
//!
//! ## Commands
//! - Opening a hosted checkout (with failure compensation)
//! - Reconciling payment status from provider webhooks

mod create_checkout;
mod handle_payment_webhook;

pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
