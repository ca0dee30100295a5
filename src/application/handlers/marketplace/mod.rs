//! Marketplace handlers.
//!
//! ## Commands
//! - Updating a proposal's status (runs the acceptance hook)
//! - Provisioning the chat conversation for an accepted proposal
//! - Minting a chat token
//!
//! ## Queries
//! - Listing the caller's conversations

mod issue_chat_token;
mod list_conversations;
mod provision_conversation;
mod update_proposal_status;

pub use issue_chat_token::{ChatToken, IssueChatTokenHandler};
pub use list_conversations::{
    ConversationSummary, CounterpartSummary, ListConversationsHandler, ProjectSummary,
    CONVERSATION_LIST_LIMIT,
};
pub use provision_conversation::{ProvisionConversationHandler, ProvisionOutcome};
pub use update_proposal_status::{
    UpdateProposalStatusCommand, UpdateProposalStatusHandler, UpdateProposalStatusResult,
};
