//! Axum router configuration for proposal and chat endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{issue_chat_token, list_conversations, update_proposal};

/// # Routes (all require authentication)
/// - `PATCH /proposals/:id` - Change a proposal's status
/// - `POST /chat/token` - Issue a messaging user token
/// - `GET /chat/conversations` - List the caller's conversations
pub fn marketplace_routes() -> Router<AppState> {
    Router::new()
        .route("/proposals/:id", patch(update_proposal))
        .route("/chat/token", post(issue_chat_token))
        .route("/chat/conversations", get(list_conversations))
}
