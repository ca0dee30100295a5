//! Bearer-token authentication for the marketplace API.
//!
//! `auth_middleware` resolves `Authorization: Bearer <token>` through the
//! [`SessionValidator`] port and stores the resulting [`AuthenticatedUser`]
//! in the request extensions. Requests without a token pass through
//! untouched so the webhook routes keep working behind the same layer.
//! Handlers that need a caller take [`RequireAuth`].
//!
//! Failures use the same `ErrorResponse` body as every other endpoint.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Validator shared by the auth layer.
pub type AuthState = Arc<dyn SessionValidator>;

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Attaches the caller to the request when a bearer token is present.
///
/// An invalid or expired token is answered with 401 without reaching the
/// handler. A validator outage is answered with 503.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "Bearer token rejected");
            ApiError::from(err).into_response()
        }
    }
}

/// The authenticated caller. Rejects with 401 when the auth layer attached none.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}
