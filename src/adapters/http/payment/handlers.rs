//! HTTP handlers for payment endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::adapters::http::error::{ApiError, WebhookAck};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::payment::{CreateCheckoutCommand, HandlePaymentWebhookCommand};

use super::dto::{CheckoutResponse, CreateCheckoutRequest};

/// Header carrying Stripe's webhook signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

/// POST /checkout - Open a hosted checkout
///
/// The checkout runs on its own task. A request timeout or client disconnect
/// drops only the wait, so compensation still runs when the provider fails.
pub async fn create_checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.checkout_handler();
    let cmd: CreateCheckoutCommand = request.into();
    let result = tokio::spawn(async move { handler.handle(&user, cmd).await }).await??;
    Ok(Json(CheckoutResponse::from(result)))
}

/// POST /payments/webhook - Handle Stripe webhooks
///
/// A missing signature header is verified as an empty one and rejected with 401.
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let handler = state.payment_webhook_handler();
    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    handler.handle(cmd).await?;

    Ok(Json(WebhookAck::processed()))
}
