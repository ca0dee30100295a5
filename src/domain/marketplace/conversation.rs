//! Conversation: the mapping from an accepted proposal to a messaging channel.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ConversationId, ProjectId, ProposalId, Timestamp};

/// Channel type used for every project conversation.
pub const CHANNEL_TYPE: &str = "messaging";

/// Identifier of a channel at the messaging provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    /// Deterministic channel id for a project: `project_<project id>`.
    pub fn for_project(project_id: &ProjectId) -> Self {
        Self(format!("project_{}", project_id))
    }

    /// Wraps a stored channel id.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Links one project/proposal pair to one external channel.
///
/// At most one live (not soft-deleted) conversation exists per proposal;
/// the record store enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub project_id: ProjectId,
    pub proposal_id: ProposalId,
    pub channel_id: ChannelId,
    pub is_deleted: bool,
    pub created_at: Timestamp,
}

/// Fields supplied when inserting a conversation; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversation {
    pub project_id: ProjectId,
    pub proposal_id: ProposalId,
    pub channel_id: ChannelId,
}

impl NewConversation {
    pub fn into_conversation(self, id: ConversationId, created_at: Timestamp) -> Conversation {
        Conversation {
            id,
            project_id: self.project_id,
            proposal_id: self.proposal_id,
            channel_id: self.channel_id,
            is_deleted: false,
            created_at,
        }
    }
}
