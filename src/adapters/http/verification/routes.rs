//! Axum router configuration for verification endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;
use crate::application::handlers::verification::VERIFICATION_WEBHOOK_PATH;

use super::handlers::{handle_verification_webhook, start_verification};

/// # Routes
/// - `POST /verify/start` - Start verification (requires authentication)
/// - `POST /verify/webhook` - Provider webhook (no auth, signature verified)
pub fn verification_routes() -> Router<AppState> {
    Router::new()
        .route("/verify/start", post(start_verification))
        .route(VERIFICATION_WEBHOOK_PATH, post(handle_verification_webhook))
}
