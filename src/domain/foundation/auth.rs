//! Authentication types for the domain layer.
//!
//! These types represent an authenticated principal extracted from a bearer
//! token. Any token issuer can populate them via the `SessionValidator` port.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ErrorCode, UserId};

/// Capability carried by a marketplace account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Freelancer,
}

impl Role {
    /// Parses the stored role value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "client" => Some(Role::Client),
            "freelancer" => Some(Role::Freelancer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Freelancer => "freelancer",
        }
    }
}

/// Authenticated principal extracted from a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier (record id in the store).
    pub id: UserId,

    /// Capability claimed by the token.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A protected route was called without a bearer token.
    #[error("Authentication required")]
    MissingToken,
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::ServiceUnavailable(_) => ErrorCode::InternalError,
            _ => ErrorCode::Unauthorized,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
