//! In-memory user repository.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::marketplace::User;
use crate::domain::verification::VerificationState;
use crate::ports::UserRepository;

/// In-memory storage for users.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    fail_updates: Arc<AtomicBool>,
    verification_writes: Arc<AtomicUsize>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    pub async fn get(&self, id: &UserId) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &UserId) {
        self.users.write().await.remove(id);
    }

    /// Make every subsequent verification update fail with a database error.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of successful verification writes.
    pub fn verification_write_count(&self) -> usize {
        self.verification_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_verification_session(
        &self,
        session_id: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.verification.session_id.as_deref() == Some(session_id))
            .cloned())
    }

    async fn update_verification(
        &self,
        id: &UserId,
        state: &VerificationState,
    ) -> Result<(), DomainError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::database("user store unavailable"));
        }

        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::NotFound, format!("User not found: {}", id))
        })?;
        user.verification = state.clone();
        self.verification_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Role;

    fn user(id: &str) -> User {
        User {
            id: UserId::new(id).unwrap(),
            role: Role::Freelancer,
            name: "Grace".to_string(),
            is_deleted: false,
            verification: VerificationState::default(),
        }
    }

    #[tokio::test]
    async fn finds_user_by_session_after_update() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("u1")).await;
        repo.update_verification(&UserId::new("u1").unwrap(), &VerificationState::started("sess_1"))
            .await
            .unwrap();

        let found = repo.find_by_verification_session("sess_1").await.unwrap().unwrap();
        assert_eq!(found.id.as_str(), "u1");
        assert!(repo.find_by_verification_session("sess_2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn updating_unknown_user_fails() {
        let repo = InMemoryUserRepository::new();
        let result = repo
            .update_verification(&UserId::new("ghost").unwrap(), &VerificationState::default())
            .await;
        assert!(result.is_err());
    }
}
