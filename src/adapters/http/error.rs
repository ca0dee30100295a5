//! Error responses shared by every endpoint.
//!
//! Domain errors carry their own status and [`ErrorCode`]; this module only
//! turns them into `(StatusCode, Json<ErrorResponse>)`. Messages of 5xx
//! persistence failures are replaced with a generic one.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, ErrorCode};
use crate::domain::marketplace::{ChatError, ProposalError};
use crate::domain::payment::{CheckoutError, PaymentWebhookError};
use crate::domain::verification::{VerificationError, VerificationWebhookError};

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Acknowledgement body returned to webhook senders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub message: String,
}

impl WebhookAck {
    pub fn processed() -> Self {
        Self {
            message: "Webhook processed".to_string(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn from_parts(status: StatusCode, code: ErrorCode, message: String) -> Self {
        let message = if code == ErrorCode::DatabaseError || code == ErrorCode::InternalError {
            tracing::error!(error_code = %code, error = %message, "Request failed");
            "Internal server error".to_string()
        } else {
            message
        };
        Self {
            status,
            body: ErrorResponse::new(code.to_string(), message),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

macro_rules! impl_from_domain_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for ApiError {
                fn from(err: $error) -> Self {
                    ApiError::from_parts(err.status_code(), err.code(), err.to_string())
                }
            }
        )+
    };
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::from_parts(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError,
            format!("request task failed: {}", err),
        )
    }
}

impl_from_domain_error!(
    AuthError,
    CheckoutError,
    PaymentWebhookError,
    VerificationError,
    VerificationWebhookError,
    ProposalError,
    ChatError,
);
