//! Mock messaging provider for testing.
//!
//! Records every call so tests can assert exactly how many channels were
//! created. Calls can be delayed to widen race windows in concurrency tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::marketplace::ChannelId;
use crate::ports::{MessagingProvider, ProviderError};

/// A channel creation observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedChannel {
    pub channel_type: String,
    pub channel_id: ChannelId,
    pub created_by: UserId,
    pub members: Vec<UserId>,
}

#[derive(Default)]
pub struct MockMessagingProvider {
    inner: Arc<Mutex<MockState>>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    upserted: Vec<UserId>,
    channels: Vec<CreatedChannel>,
    fail_upsert: Option<ProviderError>,
    fail_channel: Option<ProviderError>,
}

impl MockMessagingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every provider call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the next `upsert_users` call with `error`.
    pub fn fail_next_upsert(&self, error: ProviderError) {
        self.inner.lock().unwrap().fail_upsert = Some(error);
    }

    /// Fail the next `create_channel` call with `error`.
    pub fn fail_next_channel(&self, error: ProviderError) {
        self.inner.lock().unwrap().fail_channel = Some(error);
    }

    pub fn channels(&self) -> Vec<CreatedChannel> {
        self.inner.lock().unwrap().channels.clone()
    }

    pub fn upserted_users(&self) -> Vec<UserId> {
        self.inner.lock().unwrap().upserted.clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MessagingProvider for MockMessagingProvider {
    async fn upsert_users(&self, user_ids: &[UserId]) -> Result<(), ProviderError> {
        self.pause().await;
        let mut state = self.inner.lock().unwrap();
        if let Some(error) = state.fail_upsert.take() {
            return Err(error);
        }
        state.upserted.extend_from_slice(user_ids);
        Ok(())
    }

    async fn create_channel(
        &self,
        channel_type: &str,
        channel_id: &ChannelId,
        created_by: &UserId,
        members: &[UserId],
    ) -> Result<(), ProviderError> {
        self.pause().await;
        let mut state = self.inner.lock().unwrap();
        if let Some(error) = state.fail_channel.take() {
            return Err(error);
        }
        state.channels.push(CreatedChannel {
            channel_type: channel_type.to_string(),
            channel_id: channel_id.clone(),
            created_by: created_by.clone(),
            members: members.to_vec(),
        });
        Ok(())
    }

    fn create_user_token(&self, user_id: &UserId) -> Result<String, ProviderError> {
        Ok(format!("mock-token-{}", user_id))
    }
}
