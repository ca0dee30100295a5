//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own dto/handlers/routes module; [`router`] merges
//! them behind the bearer-token middleware.

pub mod error;
pub mod marketplace;
pub mod middleware;
pub mod payment;
pub mod router;
pub mod state;
pub mod verification;

pub use error::{ApiError, ErrorResponse, WebhookAck};
pub use router::{api_router, health_check};
pub use state::{AppDependencies, AppState};
