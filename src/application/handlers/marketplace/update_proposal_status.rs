//! UpdateProposalStatusHandler - Commits a proposal status change, then runs the acceptance hook.
//!
//! The status write commits first. When the committed proposal is live and
//! accepted, a `ProposalAccepted` event is handed to the conversation
//! provisioner. A provisioning failure is reported but does not roll the
//! status back; saving the same status again retries provisioning.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ProposalId};
use crate::domain::marketplace::{Proposal, ProposalAccepted, ProposalError, ProposalStatus};
use crate::ports::ProposalRepository;

use super::{ProvisionConversationHandler, ProvisionOutcome};

#[derive(Debug, Clone)]
pub struct UpdateProposalStatusCommand {
    pub proposal_id: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct UpdateProposalStatusResult {
    pub proposal: Proposal,
    /// Set when the acceptance hook ran.
    pub provisioning: Option<ProvisionOutcome>,
}

pub struct UpdateProposalStatusHandler {
    proposals: Arc<dyn ProposalRepository>,
    provisioner: Arc<ProvisionConversationHandler>,
}

impl UpdateProposalStatusHandler {
    pub fn new(
        proposals: Arc<dyn ProposalRepository>,
        provisioner: Arc<ProvisionConversationHandler>,
    ) -> Self {
        Self {
            proposals,
            provisioner,
        }
    }

    pub async fn handle(
        &self,
        caller: &AuthenticatedUser,
        cmd: UpdateProposalStatusCommand,
    ) -> Result<UpdateProposalStatusResult, ProposalError> {
        let proposal_id = ProposalId::new(cmd.proposal_id)
            .map_err(|e| ProposalError::validation("proposal_id", e.to_string()))?;
        let target = ProposalStatus::parse(&cmd.status).ok_or_else(|| {
            ProposalError::validation("status", "must be one of sent, accepted, rejected")
        })?;

        let mut proposal = self
            .proposals
            .find_by_id(&proposal_id)
            .await?
            .ok_or_else(|| ProposalError::NotFound(proposal_id.clone()))?;

        if proposal.change_status(caller, target)? {
            self.proposals.update_status(&proposal).await?;
            tracing::info!(
                proposal_id = %proposal.id,
                status = %target.as_str(),
                actor = %caller.id,
                "Proposal status updated"
            );
        }

        let provisioning = match ProposalAccepted::from_proposal(&proposal) {
            Some(event) => Some(self.provisioner.handle(&event).await.map_err(|err| {
                tracing::error!(proposal_id = %proposal.id, error = %err, "Conversation provisioning failed");
                ProposalError::from(err)
            })?),
            None => None,
        };

        Ok(UpdateProposalStatusResult {
            proposal,
            provisioning,
        })
    }
}
