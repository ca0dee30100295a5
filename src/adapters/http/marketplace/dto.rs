//! Request and response bodies for proposal and chat endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::marketplace::{
    ChatToken, ConversationSummary, ProvisionOutcome, UpdateProposalStatusResult,
};
use crate::domain::foundation::Timestamp;
use crate::domain::marketplace::ProposalStatus;

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProposalRequest {
    pub status: String,
}

/// The conversation opened for an accepted proposal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConversationProvisioning {
    Created {
        conversation_id: String,
        channel_id: String,
    },
    AlreadyProvisioned,
}

impl From<ProvisionOutcome> for ConversationProvisioning {
    fn from(outcome: ProvisionOutcome) -> Self {
        match outcome {
            ProvisionOutcome::Created(conversation) => ConversationProvisioning::Created {
                conversation_id: conversation.id.to_string(),
                channel_id: conversation.channel_id.as_str().to_string(),
            },
            ProvisionOutcome::AlreadyProvisioned => ConversationProvisioning::AlreadyProvisioned,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub id: String,
    pub project_id: String,
    pub client_id: String,
    pub freelancer_id: String,
    pub status: ProposalStatus,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationProvisioning>,
}

impl From<UpdateProposalStatusResult> for ProposalResponse {
    fn from(result: UpdateProposalStatusResult) -> Self {
        let proposal = result.proposal;
        Self {
            id: proposal.id.to_string(),
            project_id: proposal.project_id.to_string(),
            client_id: proposal.client_id.to_string(),
            freelancer_id: proposal.freelancer_id.to_string(),
            status: proposal.status,
            created_at: proposal.created_at,
            conversation: result.provisioning.map(ConversationProvisioning::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTokenResponse {
    pub user_id: String,
    pub token: String,
}

impl From<ChatToken> for ChatTokenResponse {
    fn from(token: ChatToken) -> Self {
        Self {
            user_id: token.user_id.to_string(),
            token: token.token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationSummary>,
}
