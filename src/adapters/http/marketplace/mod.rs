//! HTTP adapter for proposals and chat.
//!
//! - `PATCH /proposals/:id` - Change a proposal's status
//! - `POST /chat/token` - Issue a messaging user token
//! - `GET /chat/conversations` - List the caller's conversations

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::marketplace_routes;
