//! Messaging provider port.
//!
//! Message delivery and storage belong to the provider; this system only
//! registers users, creates channels, and mints client tokens.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::marketplace::ChannelId;

use super::ProviderError;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Create or update users at the provider. Idempotent.
    async fn upsert_users(&self, user_ids: &[UserId]) -> Result<(), ProviderError>;

    /// Create a channel with the given members.
    ///
    /// Creating a channel that already exists with the same id is not an
    /// error at the provider.
    async fn create_channel(
        &self,
        channel_type: &str,
        channel_id: &ChannelId,
        created_by: &UserId,
        members: &[UserId],
    ) -> Result<(), ProviderError>;

    /// Mint a client-side token for `user_id`. No expiry.
    fn create_user_token(&self, user_id: &UserId) -> Result<String, ProviderError>;
}
