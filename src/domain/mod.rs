//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors, auth)
//! - `webhook` - Provider webhook signature verification
//! - `payment` - Checkout attempts, platform fee, payment status rules
//! - `verification` - Identity verification state and webhook decisions
//! - `marketplace` - Users, projects, proposals, conversations

pub mod foundation;
pub mod marketplace;
pub mod payment;
pub mod verification;
pub mod webhook;
