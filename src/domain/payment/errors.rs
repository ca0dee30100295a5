//! Payment error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | CheckoutError::Validation | 400 |
//! | CheckoutError::InvalidFreelancer | 400 |
//! | CheckoutError::Forbidden | 403 |
//! | CheckoutError::ProjectNotFound | 404 |
//! | CheckoutError::FreelancerNotFound | 404 |
//! | CheckoutError::Upstream | 502 |
//! | CheckoutError::Infrastructure | 500 |
//! | PaymentWebhookError::InvalidSignature | 401 |
//! | PaymentWebhookError::MalformedPayload | 400 |
//! | PaymentWebhookError::MissingPaymentId | 400 |
//! | PaymentWebhookError::UnhandledEventType | 400 |
//! | PaymentWebhookError::PaymentNotFound | 404 |
//! | PaymentWebhookError::Database | 500 |

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, ValidationError};
use crate::domain::webhook::SignatureError;

/// Errors raised while opening a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Forbidden(String),

    #[error("Project not found")]
    ProjectNotFound,

    #[error("Freelancer not found")]
    FreelancerNotFound,

    /// The referenced user is soft-deleted or does not hold the freelancer role.
    #[error("Invalid freelancer")]
    InvalidFreelancer,

    /// The payment provider rejected or failed the checkout request.
    #[error("Payment provider error: {0}")]
    Upstream(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl CheckoutError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CheckoutError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        CheckoutError::Forbidden(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::Validation { .. } | CheckoutError::InvalidFreelancer => {
                ErrorCode::ValidationFailed
            }
            CheckoutError::Forbidden(_) => ErrorCode::Forbidden,
            CheckoutError::ProjectNotFound | CheckoutError::FreelancerNotFound => {
                ErrorCode::NotFound
            }
            CheckoutError::Upstream(_) => ErrorCode::ExternalServiceError,
            CheckoutError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::Validation { .. } | CheckoutError::InvalidFreelancer => {
                StatusCode::BAD_REQUEST
            }
            CheckoutError::Forbidden(_) => StatusCode::FORBIDDEN,
            CheckoutError::ProjectNotFound | CheckoutError::FreelancerNotFound => {
                StatusCode::NOT_FOUND
            }
            CheckoutError::Upstream(_) => StatusCode::BAD_GATEWAY,
            CheckoutError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        CheckoutError::Validation {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CheckoutError {
    fn from(err: DomainError) -> Self {
        CheckoutError::Infrastructure(err.to_string())
    }
}

/// Errors that occur while reconciling a payment-provider webhook.
///
/// Status codes determine the provider's redelivery behavior:
/// 2xx acknowledges, 4xx is permanent, 5xx is redelivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentWebhookError {
    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The event carries no `payment_id` correlation metadata.
    #[error("Missing payment_id metadata")]
    MissingPaymentId,

    #[error("Unhandled event type: {0}")]
    UnhandledEventType(String),

    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    #[error("Database error: {0}")]
    Database(String),
}

impl PaymentWebhookError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentWebhookError::InvalidSignature(_) => ErrorCode::Unauthorized,
            PaymentWebhookError::MalformedPayload(_)
            | PaymentWebhookError::MissingPaymentId
            | PaymentWebhookError::UnhandledEventType(_) => ErrorCode::ValidationFailed,
            PaymentWebhookError::PaymentNotFound(_) => ErrorCode::NotFound,
            PaymentWebhookError::Database(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentWebhookError::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
            PaymentWebhookError::MalformedPayload(_)
            | PaymentWebhookError::MissingPaymentId
            | PaymentWebhookError::UnhandledEventType(_) => StatusCode::BAD_REQUEST,
            PaymentWebhookError::PaymentNotFound(_) => StatusCode::NOT_FOUND,
            PaymentWebhookError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true if the provider should redeliver the event.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentWebhookError::Database(_))
    }
}

impl From<DomainError> for PaymentWebhookError {
    fn from(err: DomainError) -> Self {
        PaymentWebhookError::Database(err.to_string())
    }
}
