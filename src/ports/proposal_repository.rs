//! Proposal repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProposalId, UserId};
use crate::domain::marketplace::Proposal;

#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Find a proposal by id, including soft-deleted proposals.
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError>;

    /// Persist the status of an existing proposal.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the proposal doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_status(&self, proposal: &Proposal) -> Result<(), DomainError>;

    /// Live accepted proposals where `user_id` is the client or the
    /// freelancer, newest first, at most `limit`.
    async fn list_accepted_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<Proposal>, DomainError>;
}
