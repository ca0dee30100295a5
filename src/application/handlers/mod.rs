//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod marketplace;
pub mod payment;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_support;
