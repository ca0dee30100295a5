//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Bearer token validation (HS256 JWT, mock)
//! - `didit` - Identity verification provider
//! - `http` - REST API (axum)
//! - `memory` - In-memory record stores
//! - `postgres` - PostgreSQL record stores
//! - `stream` - Messaging provider
//! - `stripe` - Payment provider

pub mod auth;
pub mod didit;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stream;
pub mod stripe;

pub use auth::{JwtSessionValidator, MockSessionValidator};
pub use didit::{DiditClient, MockIdentityProvider};
pub use http::{api_router, AppDependencies, AppState};
pub use stream::{MockMessagingProvider, StreamClient};
pub use stripe::{MockPaymentProvider, StripePaymentAdapter};
