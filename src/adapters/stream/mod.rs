//! Stream Chat messaging adapter.

mod mock_messaging_provider;
mod stream_client;

pub use mock_messaging_provider::{CreatedChannel, MockMessagingProvider};
pub use stream_client::{StreamClient, StreamConfig, DEFAULT_API_BASE_URL};
