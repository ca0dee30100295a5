//! Marketplace error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ProposalError::NotFound | 404 |
//! | ProposalError::Forbidden | 403 |
//! | ProposalError::Validation | 400 |
//! | ProposalError::Infrastructure | 500 |
//! | ProvisioningError::ProjectNotFound | 500 |
//! | ProvisioningError::Provider | 502 |
//! | ProvisioningError::Database | 500 |
//! | ChatError::Token | 500 |
//! | ChatError::Database | 500 |
//! | ChatError::MissingRecord | 500 |

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, ProposalId};

/// Failure while provisioning a conversation for an accepted proposal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisioningError {
    /// The accepted proposal points at a project the store cannot find.
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The messaging provider rejected a user upsert or channel creation.
    #[error("Messaging provider error: {0}")]
    Provider(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl ProvisioningError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProvisioningError::ProjectNotFound(_) => ErrorCode::InternalError,
            ProvisioningError::Provider(_) => ErrorCode::ExternalServiceError,
            ProvisioningError::Database(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProvisioningError::Provider(_) => StatusCode::BAD_GATEWAY,
            ProvisioningError::ProjectNotFound(_) | ProvisioningError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DomainError> for ProvisioningError {
    fn from(err: DomainError) -> Self {
        ProvisioningError::Database(err.to_string())
    }
}

/// Errors from a proposal status update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProposalError {
    #[error("Proposal not found: {0}")]
    NotFound(ProposalId),

    #[error("{0}")]
    Forbidden(String),

    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The status change committed, but provisioning the conversation failed.
    #[error("Proposal updated but conversation provisioning failed: {0}")]
    Provisioning(#[from] ProvisioningError),

    #[error("Database error: {0}")]
    Infrastructure(String),
}

impl ProposalError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        ProposalError::Forbidden(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProposalError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProposalError::NotFound(_) => ErrorCode::NotFound,
            ProposalError::Forbidden(_) => ErrorCode::Forbidden,
            ProposalError::Validation { .. } => ErrorCode::ValidationFailed,
            ProposalError::Provisioning(inner) => inner.code(),
            ProposalError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProposalError::NotFound(_) => StatusCode::NOT_FOUND,
            ProposalError::Forbidden(_) => StatusCode::FORBIDDEN,
            ProposalError::Validation { .. } => StatusCode::BAD_REQUEST,
            ProposalError::Provisioning(inner) => inner.status_code(),
            ProposalError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ProposalError {
    fn from(err: DomainError) -> Self {
        ProposalError::Infrastructure(err.to_string())
    }
}

/// Errors from the chat endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Failed to generate token: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A conversation points at a project or user the store no longer has.
    #[error("Missing record: {0}")]
    MissingRecord(String),
}

impl ChatError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::Token(_) => ErrorCode::InternalError,
            ChatError::Database(_) => ErrorCode::DatabaseError,
            ChatError::MissingRecord(_) => ErrorCode::InternalError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        ChatError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_errors_map_to_statuses() {
        assert_eq!(
            ProposalError::NotFound(ProposalId::new("p").unwrap()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ProposalError::forbidden("no").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ProposalError::validation("status", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn provisioning_failure_keeps_its_status() {
        let err = ProposalError::from(ProvisioningError::Provider("timeout".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), ErrorCode::ExternalServiceError);

        let err = ProposalError::from(ProvisioningError::Database("down".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_become_infrastructure() {
        let err = ProposalError::from(DomainError::database("down"));
        assert!(matches!(err, ProposalError::Infrastructure(_)));
    }
}
