//! Marketplace user record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, UserId};
use crate::domain::verification::VerificationState;

/// A client or freelancer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub role: Role,
    pub name: String,
    pub is_deleted: bool,
    pub verification: VerificationState,
}

impl User {
    /// True for a live account holding the freelancer role.
    pub fn is_active_freelancer(&self) -> bool {
        !self.is_deleted && self.role == Role::Freelancer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, is_deleted: bool) -> User {
        User {
            id: UserId::new("user-1").unwrap(),
            role,
            name: "Ada".to_string(),
            is_deleted,
            verification: VerificationState::default(),
        }
    }

    #[test]
    fn active_freelancer_requires_role_and_live_record() {
        assert!(user(Role::Freelancer, false).is_active_freelancer());
        assert!(!user(Role::Freelancer, true).is_active_freelancer());
        assert!(!user(Role::Client, false).is_active_freelancer());
    }
}
