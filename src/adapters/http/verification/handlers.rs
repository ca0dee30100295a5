//! HTTP handlers for verification endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::adapters::http::error::{ApiError, WebhookAck};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::verification::HandleVerificationWebhookCommand;

use super::dto::StartVerificationResponse;

pub const SIGNATURE_HEADER: &str = "X-Signature-V2";
pub const TIMESTAMP_HEADER: &str = "X-Timestamp";

/// POST /verify/start - Open a verification session for the caller
pub async fn start_verification(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.start_verification_handler();
    let result = handler.handle(&user).await?;
    Ok(Json(StartVerificationResponse::from(result)))
}

/// POST /verify/webhook - Handle identity provider webhooks
///
/// Only authentication failures are reported; every authenticated delivery
/// is acknowledged.
pub async fn handle_verification_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let handler = state.verification_webhook_handler();
    let cmd = HandleVerificationWebhookCommand {
        payload: body.to_vec(),
        signature: header(SIGNATURE_HEADER),
        timestamp: header(TIMESTAMP_HEADER),
    };

    let outcome = handler.handle(cmd).await?;
    tracing::debug!(?outcome, "Verification webhook acknowledged");

    Ok(Json(WebhookAck::processed()))
}
