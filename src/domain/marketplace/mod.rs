//! Marketplace records: users, projects, proposals, and conversations.
//!
//! An accepted proposal gets exactly one conversation, backed by one channel
//! at the messaging provider.

mod conversation;
mod errors;
mod events;
mod project;
mod proposal;
mod user;

pub use conversation::{ChannelId, Conversation, NewConversation, CHANNEL_TYPE};
pub use errors::{ChatError, ProposalError, ProvisioningError};
pub use events::ProposalAccepted;
pub use project::{Project, ProjectStatus};
pub use proposal::{Proposal, ProposalStatus};
pub use user::User;
