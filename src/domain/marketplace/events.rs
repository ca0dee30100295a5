//! Marketplace domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, ProposalId, UserId};

use super::{Proposal, ProposalStatus};

/// Published after a proposal update commits with status accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalAccepted {
    pub proposal_id: ProposalId,
    pub project_id: ProjectId,
    pub client_id: UserId,
    pub freelancer_id: UserId,
}

impl ProposalAccepted {
    /// Derives the event from a committed proposal.
    ///
    /// Returns `None` unless the proposal is live and accepted.
    pub fn from_proposal(proposal: &Proposal) -> Option<Self> {
        if proposal.is_deleted || proposal.status != ProposalStatus::Accepted {
            return None;
        }
        Some(Self {
            proposal_id: proposal.id.clone(),
            project_id: proposal.project_id.clone(),
            client_id: proposal.client_id.clone(),
            freelancer_id: proposal.freelancer_id.clone(),
        })
    }
}
