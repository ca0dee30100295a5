//! HandleVerificationWebhookHandler - Reconciles identity verification status.
//!
//! Only authentication failures are reported to the caller. Everything that
//! happens after a valid signature is logged and acknowledged, so the
//! provider never redelivers on our account.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::verification::{
    VerificationStatus, VerificationWebhookError, VerificationWebhookPayload,
};
use crate::domain::webhook::{signature, MAX_TIMESTAMP_SKEW_SECS};
use crate::ports::UserRepository;

/// Command to handle an identity provider webhook.
#[derive(Debug, Clone)]
pub struct HandleVerificationWebhookCommand {
    pub payload: Vec<u8>,
    /// `X-Signature-V2` header value.
    pub signature: Option<String>,
    /// `X-Timestamp` header value.
    pub timestamp: Option<String>,
}

/// What happened to an authenticated webhook. All variants are acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationWebhookOutcome {
    Updated {
        user_id: UserId,
        status: VerificationStatus,
    },
    /// The stored verification state already matched.
    Unchanged { user_id: UserId },
    /// Session id, status or webhook type was empty.
    Incomplete,
    /// No user holds the session id.
    UnknownSession { session_id: String },
    /// The store rejected the write.
    NotPersisted { user_id: UserId },
}

pub struct HandleVerificationWebhookHandler {
    users: Arc<dyn UserRepository>,
    webhook_secret: SecretString,
}

impl HandleVerificationWebhookHandler {
    pub fn new(users: Arc<dyn UserRepository>, webhook_secret: SecretString) -> Self {
        Self {
            users,
            webhook_secret,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleVerificationWebhookCommand,
    ) -> Result<VerificationWebhookOutcome, VerificationWebhookError> {
        self.handle_at(cmd, Timestamp::now().as_unix_secs()).await
    }

    /// Processes the webhook as if received at `now` (epoch seconds).
    pub async fn handle_at(
        &self,
        cmd: HandleVerificationWebhookCommand,
        now: i64,
    ) -> Result<VerificationWebhookOutcome, VerificationWebhookError> {
        signature::check(
            self.webhook_secret.expose_secret(),
            cmd.signature.as_deref(),
            &cmd.payload,
            cmd.timestamp.as_deref(),
            now,
            MAX_TIMESTAMP_SKEW_SECS,
        )
        .map_err(|err| {
            tracing::warn!(reason = %err, "Verification webhook signature rejected");
            VerificationWebhookError::from(err)
        })?;

        let payload: VerificationWebhookPayload = serde_json::from_slice(&cmd.payload)
            .map_err(|err| {
                tracing::warn!(error = %err, "Verification webhook payload is not valid JSON");
                VerificationWebhookError::InvalidPayload(err.to_string())
            })?;

        let Some(decision) = payload.decision() else {
            tracing::info!(
                session_id = %payload.session_id,
                status = %payload.status,
                webhook_type = %payload.webhook_type,
                "Verification webhook missing session, status or type"
            );
            return Ok(VerificationWebhookOutcome::Incomplete);
        };

        let user = match self
            .users
            .find_by_verification_session(&decision.session_id)
            .await
        {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::info!(session_id = %decision.session_id, "No user for verification session");
                return Ok(VerificationWebhookOutcome::UnknownSession {
                    session_id: decision.session_id,
                });
            }
            Err(err) => {
                tracing::error!(session_id = %decision.session_id, error = %err, "Failed to look up verification session");
                return Ok(VerificationWebhookOutcome::UnknownSession {
                    session_id: decision.session_id,
                });
            }
        };

        let Some(next) = user.verification.apply(&decision) else {
            tracing::debug!(user_id = %user.id, status = %decision.status, "Verification state unchanged");
            return Ok(VerificationWebhookOutcome::Unchanged { user_id: user.id });
        };

        if let Err(err) = self.users.update_verification(&user.id, &next).await {
            tracing::error!(user_id = %user.id, error = %err, "Failed to save verification status");
            return Ok(VerificationWebhookOutcome::NotPersisted { user_id: user.id });
        }

        tracing::info!(
            user_id = %user.id,
            session_id = %decision.session_id,
            status = %decision.status,
            "Verification status updated"
        );
        Ok(VerificationWebhookOutcome::Updated {
            user_id: user.id,
            status: decision.status,
        })
    }
}
