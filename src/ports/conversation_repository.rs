//! Conversation repository port.
//!
//! # Uniqueness
//!
//! At most one live conversation exists per proposal. Implementations must
//! enforce this atomically at insert time and report a violation as
//! `ErrorCode::Conflict`, which callers treat as "already provisioned".

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProposalId};
use crate::domain::marketplace::{Conversation, NewConversation};

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find the live conversation for a proposal.
    async fn find_live_by_proposal(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<Conversation>, DomainError>;

    /// Insert a conversation.
    ///
    /// # Errors
    ///
    /// - `Conflict` if a live conversation already exists for the proposal
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, conversation: NewConversation) -> Result<Conversation, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ConversationRepository) {}
    }
}
