//! IssueChatTokenHandler - Mints a messaging-provider token for the caller.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, UserId};
use crate::domain::marketplace::ChatError;
use crate::ports::MessagingProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatToken {
    pub user_id: UserId,
    pub token: String,
}

pub struct IssueChatTokenHandler {
    messaging: Arc<dyn MessagingProvider>,
}

impl IssueChatTokenHandler {
    pub fn new(messaging: Arc<dyn MessagingProvider>) -> Self {
        Self { messaging }
    }

    pub fn handle(&self, caller: &AuthenticatedUser) -> Result<ChatToken, ChatError> {
        let token = self.messaging.create_user_token(&caller.id).map_err(|err| {
            tracing::error!(user_id = %caller.id, error = %err, "Failed to mint chat token");
            ChatError::Token(err.to_string())
        })?;

        Ok(ChatToken {
            user_id: caller.id.clone(),
            token,
        })
    }
}
