//! Identity verification domain.
//!
//! - `status` - provider status, case-normalized
//! - `state` - per-user verification fields and the decision merge rule
//! - `webhook` - inbound webhook payload shape

mod errors;
mod state;
mod status;
mod webhook;

pub use errors::{VerificationError, VerificationWebhookError};
pub use state::{VerificationDecision, VerificationState};
pub use status::VerificationStatus;
pub use webhook::{VerificationWebhookPayload, WebhookDecision};
