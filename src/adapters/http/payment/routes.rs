//! Axum router configuration for payment endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{create_checkout, handle_payment_webhook};

/// # Routes
/// - `POST /checkout` - Open a hosted checkout (requires authentication)
/// - `POST /payments/webhook` - Stripe webhook (no auth, signature verified)
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/payments/webhook", post(handle_payment_webhook))
}
