//! Proposal record and its status rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{AuthenticatedUser, ProjectId, ProposalId, Timestamp, UserId};

use super::ProposalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Sent,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Sent => "sent",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sent" => Some(ProposalStatus::Sent),
            "accepted" => Some(ProposalStatus::Accepted),
            "rejected" => Some(ProposalStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A freelancer's proposal on a client's project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub project_id: ProjectId,
    pub client_id: UserId,
    pub freelancer_id: UserId,
    pub message: String,
    pub status: ProposalStatus,
    pub is_deleted: bool,
    pub created_at: Timestamp,
}

impl Proposal {
    /// Applies a status change requested by `actor`.
    ///
    /// The owning client decides (accepted or rejected). The owning
    /// freelancer may only withdraw a proposal that is still sent. Returns
    /// whether the stored status changed.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the proposal is soft-deleted
    /// - `Forbidden` if the actor is not allowed to make this change
    /// - `Validation` if a client tries to move the proposal back to sent
    pub fn change_status(
        &mut self,
        actor: &AuthenticatedUser,
        target: ProposalStatus,
    ) -> Result<bool, ProposalError> {
        if self.is_deleted {
            return Err(ProposalError::NotFound(self.id.clone()));
        }

        if actor.id == self.client_id {
            if target == ProposalStatus::Sent {
                return Err(ProposalError::validation(
                    "status",
                    "a proposal can only be accepted or rejected",
                ));
            }
        } else if actor.id == self.freelancer_id {
            if self.status != ProposalStatus::Sent || target != ProposalStatus::Rejected {
                return Err(ProposalError::forbidden(
                    "freelancers can only withdraw a proposal that is still sent",
                ));
            }
        } else {
            return Err(ProposalError::forbidden("not a party to this proposal"));
        }

        let changed = self.status != target;
        self.status = target;
        Ok(changed)
    }

    /// Returns the user on the other side of the proposal from `user_id`.
    pub fn counterpart_of(&self, user_id: &UserId) -> &UserId {
        if &self.freelancer_id == user_id {
            &self.client_id
        } else {
            &self.freelancer_id
        }
    }
}
