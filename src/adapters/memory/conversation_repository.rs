//! In-memory conversation repository.
//!
//! Insert checks for a live conversation and writes under one write lock,
//! matching the partial unique index the PostgreSQL adapter relies on.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{ConversationId, DomainError, ProposalId, Timestamp};
use crate::domain::marketplace::{Conversation, NewConversation};
use crate::ports::ConversationRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    conversations: Arc<RwLock<Vec<Conversation>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All conversations, including soft-deleted ones.
    pub async fn all(&self) -> Vec<Conversation> {
        self.conversations.read().await.clone()
    }

    /// Soft-delete every conversation of a proposal.
    pub async fn soft_delete_for_proposal(&self, proposal_id: &ProposalId) {
        for conversation in self.conversations.write().await.iter_mut() {
            if &conversation.proposal_id == proposal_id {
                conversation.is_deleted = true;
            }
        }
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn find_live_by_proposal(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<Conversation>, DomainError> {
        Ok(self
            .conversations
            .read()
            .await
            .iter()
            .find(|c| &c.proposal_id == proposal_id && !c.is_deleted)
            .cloned())
    }

    async fn insert(&self, conversation: NewConversation) -> Result<Conversation, DomainError> {
        let mut conversations = self.conversations.write().await;
        let exists = conversations
            .iter()
            .any(|c| c.proposal_id == conversation.proposal_id && !c.is_deleted);
        if exists {
            return Err(DomainError::conflict(format!(
                "live conversation already exists for proposal {}",
                conversation.proposal_id
            )));
        }

        let id = ConversationId::new(uuid::Uuid::new_v4().to_string())?;
        let conversation = conversation.into_conversation(id, Timestamp::now());
        conversations.push(conversation.clone());
        Ok(conversation)
    }
}
