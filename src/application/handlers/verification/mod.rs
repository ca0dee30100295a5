//! Identity verification handlers.
//!
//! - Starting a verification session for the signed-in user
//! - Reconciling verification status from provider webhooks

mod handle_verification_webhook;
mod start_verification;

pub use handle_verification_webhook::{
    HandleVerificationWebhookCommand, HandleVerificationWebhookHandler,
    VerificationWebhookOutcome,
};
pub use start_verification::{
    StartVerificationHandler, StartVerificationResult, VERIFICATION_WEBHOOK_PATH,
};
