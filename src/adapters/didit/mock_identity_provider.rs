//! Mock identity provider for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CreateVerificationRequest, IdentityProvider, ProviderError, VerificationSession,
};

/// Mock identity provider with error injection and call tracking.
#[derive(Default)]
pub struct MockIdentityProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_error: Option<ProviderError>,
    requests: Vec<CreateVerificationRequest>,
    sessions_created: u32,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `create_verification_session` call with `error`.
    pub fn fail_next(&self, error: ProviderError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<CreateVerificationRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_verification_session(
        &self,
        request: CreateVerificationRequest,
    ) -> Result<VerificationSession, ProviderError> {
        let mut state = self.inner.lock().unwrap();
        state.requests.push(request);

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        state.sessions_created += 1;
        let session_id = format!("sess_test_{}", state.sessions_created);
        Ok(VerificationSession {
            url: format!("https://verify.didit.test/session/{}", session_id),
            session_id,
        })
    }
}
