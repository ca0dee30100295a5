//! HTTP handlers for proposal and chat endpoints.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::marketplace::UpdateProposalStatusCommand;

use super::dto::{
    ChatTokenResponse, ConversationListResponse, ProposalResponse, UpdateProposalRequest,
};

/// PATCH /proposals/:id - Change a proposal's status
///
/// Accepting a proposal provisions its conversation before responding. If
/// provisioning fails the status change stays committed and the error is
/// returned; saving the same status again retries. The work runs on its own
/// task so a dropped request cannot interrupt provisioning halfway.
pub async fn update_proposal(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(proposal_id): Path<String>,
    Json(request): Json<UpdateProposalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.update_proposal_handler();
    let cmd = UpdateProposalStatusCommand {
        proposal_id,
        status: request.status,
    };

    let result = tokio::spawn(async move { handler.handle(&user, cmd).await }).await??;
    Ok(Json(ProposalResponse::from(result)))
}

/// POST /chat/token - Issue a messaging user token
pub async fn issue_chat_token(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.chat_token_handler().handle(&user)?;
    Ok(Json(ChatTokenResponse::from(token)))
}

/// GET /chat/conversations - List the caller's conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let conversations = state.list_conversations_handler().handle(&user).await?;
    Ok(Json(ConversationListResponse { conversations }))
}
