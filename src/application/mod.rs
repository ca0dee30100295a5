//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::marketplace::{
    ChatToken, ConversationSummary, IssueChatTokenHandler, ListConversationsHandler,
    ProvisionConversationHandler, ProvisionOutcome, UpdateProposalStatusCommand,
    UpdateProposalStatusHandler, UpdateProposalStatusResult,
};
pub use handlers::payment::{
    CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult,
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use handlers::verification::{
    HandleVerificationWebhookCommand, HandleVerificationWebhookHandler, StartVerificationHandler,
    StartVerificationResult, VerificationWebhookOutcome,
};
