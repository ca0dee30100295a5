//! In-memory proposal repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId, UserId};
use crate::domain::marketplace::{Proposal, ProposalStatus};
use crate::ports::ProposalRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProposalRepository {
    proposals: Arc<RwLock<HashMap<ProposalId, Proposal>>>,
}

impl InMemoryProposalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a proposal record.
    pub async fn insert(&self, proposal: Proposal) {
        self.proposals.write().await.insert(proposal.id.clone(), proposal);
    }

    pub async fn get(&self, id: &ProposalId) -> Option<Proposal> {
        self.proposals.read().await.get(id).cloned()
    }
}

#[async_trait]
impl ProposalRepository for InMemoryProposalRepository {
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
        Ok(self.proposals.read().await.get(id).cloned())
    }

    async fn update_status(&self, proposal: &Proposal) -> Result<(), DomainError> {
        let mut proposals = self.proposals.write().await;
        let stored = proposals.get_mut(&proposal.id).ok_or_else(|| {
            DomainError::new(ErrorCode::NotFound, format!("Proposal not found: {}", proposal.id))
        })?;
        stored.status = proposal.status;
        Ok(())
    }

    async fn list_accepted_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<Proposal>, DomainError> {
        let mut matches: Vec<Proposal> = self
            .proposals
            .read()
            .await
            .values()
            .filter(|p| {
                !p.is_deleted
                    && p.status == ProposalStatus::Accepted
                    && (&p.client_id == user_id || &p.freelancer_id == user_id)
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches.truncate(limit as usize);
        Ok(matches)
    }
}
