//! StartVerificationHandler - Opens an identity verification session for the caller.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::verification::{VerificationError, VerificationState};
use crate::ports::{CreateVerificationRequest, IdentityProvider, UserRepository};

/// Path the identity provider calls back on.
pub const VERIFICATION_WEBHOOK_PATH: &str = "/verify/webhook";

/// Result of a started verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartVerificationResult {
    pub verification_url: String,
    pub session_id: String,
}

pub struct StartVerificationHandler {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
    callback_url: String,
}

impl StartVerificationHandler {
    /// `callback_base_url` is the public base the provider can reach; a
    /// trailing slash is ignored.
    pub fn new(
        users: Arc<dyn UserRepository>,
        identity: Arc<dyn IdentityProvider>,
        callback_base_url: &str,
    ) -> Self {
        Self {
            users,
            identity,
            callback_url: format!(
                "{}{}",
                callback_base_url.trim_end_matches('/'),
                VERIFICATION_WEBHOOK_PATH
            ),
        }
    }

    pub async fn handle(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<StartVerificationResult, VerificationError> {
        self.users
            .find_by_id(&caller.id)
            .await?
            .filter(|u| !u.is_deleted)
            .ok_or(VerificationError::UserNotFound)?;

        let session = self
            .identity
            .create_verification_session(CreateVerificationRequest {
                vendor_data: caller.id.to_string(),
                callback_url: self.callback_url.clone(),
            })
            .await
            .map_err(|err| {
                tracing::warn!(user_id = %caller.id, error = %err, "Verification session creation failed");
                VerificationError::Upstream(err.to_string())
            })?;

        self.users
            .update_verification(&caller.id, &VerificationState::started(&session.session_id))
            .await
            .map_err(|err| {
                tracing::error!(user_id = %caller.id, error = %err, "Failed to store verification session");
                VerificationError::from(err)
            })?;

        tracing::info!(user_id = %caller.id, session_id = %session.session_id, "Verification session started");

        Ok(StartVerificationResult {
            verification_url: session.url,
            session_id: session.session_id,
        })
    }
}
