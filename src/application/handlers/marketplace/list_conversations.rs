//! ListConversationsHandler - The caller's chats, one per accepted proposal.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{AuthenticatedUser, ConversationId, ProjectId, ProposalId, Role, UserId};
use crate::domain::marketplace::{ChannelId, ChatError, ProjectStatus};
use crate::ports::{ConversationRepository, ProjectRepository, ProposalRepository, UserRepository};

/// Maximum number of proposals considered per listing.
pub const CONVERSATION_LIST_LIMIT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub title: String,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterpartSummary {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    pub conversation_id: ConversationId,
    pub channel_id: ChannelId,
    pub proposal_id: ProposalId,
    pub project: ProjectSummary,
    pub counterpart: CounterpartSummary,
}

pub struct ListConversationsHandler {
    proposals: Arc<dyn ProposalRepository>,
    conversations: Arc<dyn ConversationRepository>,
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
}

impl ListConversationsHandler {
    pub fn new(
        proposals: Arc<dyn ProposalRepository>,
        conversations: Arc<dyn ConversationRepository>,
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            proposals,
            conversations,
            projects,
            users,
        }
    }

    /// Newest proposals first. Proposals without a live conversation are
    /// skipped; a conversation whose project or counterpart is gone fails the
    /// whole listing.
    pub async fn handle(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<Vec<ConversationSummary>, ChatError> {
        let proposals = self
            .proposals
            .list_accepted_for_user(&caller.id, CONVERSATION_LIST_LIMIT)
            .await?;

        let mut summaries = Vec::with_capacity(proposals.len());
        for proposal in proposals {
            let Some(conversation) = self.conversations.find_live_by_proposal(&proposal.id).await?
            else {
                continue;
            };

            let Some(project) = self.projects.find_by_id(&proposal.project_id).await? else {
                tracing::error!(proposal_id = %proposal.id, project_id = %proposal.project_id, "Conversation project missing");
                return Err(ChatError::MissingRecord(format!("project {}", proposal.project_id)));
            };

            let counterpart_id = proposal.counterpart_of(&caller.id);
            let Some(counterpart) = self.users.find_by_id(counterpart_id).await? else {
                tracing::error!(proposal_id = %proposal.id, user_id = %counterpart_id, "Conversation counterpart missing");
                return Err(ChatError::MissingRecord(format!("user {}", counterpart_id)));
            };

            summaries.push(ConversationSummary {
                conversation_id: conversation.id,
                channel_id: conversation.channel_id,
                proposal_id: proposal.id,
                project: ProjectSummary {
                    id: project.id,
                    title: project.title,
                    status: project.status,
                },
                counterpart: CounterpartSummary {
                    id: counterpart.id,
                    name: counterpart.name,
                    role: counterpart.role,
                },
            });
        }

        Ok(summaries)
    }
}
