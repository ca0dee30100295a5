//! HTTP adapter for identity verification.
//!
//! - `POST /verify/start` - Open a verification session for the caller
//! - `POST /verify/webhook` - Identity provider webhook (signature verified)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::verification_routes;
