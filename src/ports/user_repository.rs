//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::marketplace::User;
use crate::domain::verification::VerificationState;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id, including soft-deleted users.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find the user whose verification session id equals `session_id`.
    async fn find_by_verification_session(
        &self,
        session_id: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Overwrite the verification fields of a user.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_verification(
        &self,
        id: &UserId,
        state: &VerificationState,
    ) -> Result<(), DomainError>;
}
