//! Didit identity verification adapter.

mod didit_client;
mod mock_identity_provider;

pub use didit_client::{DiditClient, DiditConfig, DEFAULT_API_BASE_URL};
pub use mock_identity_provider::MockIdentityProvider;
