//! Identity verification provider port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ProviderError;

/// Port for identity verification provider integrations.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Open a verification session the user completes at the provider.
    ///
    /// # Errors
    ///
    /// `InvalidResponse` when the provider omits the session id or URL.
    async fn create_verification_session(
        &self,
        request: CreateVerificationRequest,
    ) -> Result<VerificationSession, ProviderError>;
}

/// Request to open a verification session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVerificationRequest {
    /// Opaque correlation data echoed by the provider (the user id).
    pub vendor_data: String,

    /// Where the provider delivers status webhooks.
    pub callback_url: String,
}

/// A verification session opened at the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    pub session_id: String,

    /// URL the user visits to complete verification.
    pub url: String,
}
