//! Verification error types.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::webhook::SignatureError;

/// Errors raised while starting a verification session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("User not found")]
    UserNotFound,

    /// The identity provider failed or returned an incomplete session.
    #[error("Failed to create verification session: {0}")]
    Upstream(String),

    #[error("Failed to save verification status: {0}")]
    Infrastructure(String),
}

impl VerificationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            VerificationError::UserNotFound => ErrorCode::NotFound,
            VerificationError::Upstream(_) => ErrorCode::ExternalServiceError,
            VerificationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            VerificationError::UserNotFound => StatusCode::NOT_FOUND,
            VerificationError::Upstream(_) => StatusCode::BAD_GATEWAY,
            VerificationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for VerificationError {
    fn from(err: DomainError) -> Self {
        VerificationError::Infrastructure(err.to_string())
    }
}

/// Rejections of an identity provider webhook.
///
/// Everything past authentication is acknowledged, so only these two
/// outcomes ever reach the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationWebhookError {
    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl VerificationWebhookError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Unauthorized
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_errors_map_to_statuses() {
        assert_eq!(VerificationError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            VerificationError::Upstream("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            VerificationError::Infrastructure("db".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn webhook_rejections_are_unauthorized() {
        let stale = VerificationWebhookError::from(SignatureError::StaleTimestamp { skew_secs: 301 });
        assert_eq!(stale.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            VerificationWebhookError::InvalidPayload("eof".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
