//! Record fixtures shared by handler tests.

use crate::domain::foundation::{ProjectId, ProposalId, Role, Timestamp, UserId};
use crate::domain::marketplace::{Project, ProjectStatus, Proposal, ProposalStatus, User};
use crate::domain::verification::VerificationState;

pub const CLIENT_ID: &str = "client-1";
pub const FREELANCER_ID: &str = "freelancer-1";
pub const PROJECT_ID: &str = "project-1";
pub const PROPOSAL_ID: &str = "proposal-1";

pub fn user(id: &str, role: Role) -> User {
    User {
        id: UserId::new(id).unwrap(),
        role,
        name: format!("User {}", id),
        is_deleted: false,
        verification: VerificationState::default(),
    }
}

pub fn client() -> User {
    user(CLIENT_ID, Role::Client)
}

pub fn freelancer() -> User {
    user(FREELANCER_ID, Role::Freelancer)
}

pub fn project() -> Project {
    Project {
        id: ProjectId::new(PROJECT_ID).unwrap(),
        client_id: UserId::new(CLIENT_ID).unwrap(),
        title: "Landing page redesign".to_string(),
        status: ProjectStatus::Open,
        is_deleted: false,
    }
}

pub fn proposal(status: ProposalStatus) -> Proposal {
    Proposal {
        id: ProposalId::new(PROPOSAL_ID).unwrap(),
        project_id: ProjectId::new(PROJECT_ID).unwrap(),
        client_id: UserId::new(CLIENT_ID).unwrap(),
        freelancer_id: UserId::new(FREELANCER_ID).unwrap(),
        message: "I can start Monday".to_string(),
        status,
        is_deleted: false,
        created_at: Timestamp::now(),
    }
}
