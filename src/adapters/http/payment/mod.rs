//! HTTP adapter for payments.
//!
//! - `POST /checkout` - Open a hosted checkout (client only)
//! - `POST /payments/webhook` - Stripe webhook (signature verified)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_routes;
