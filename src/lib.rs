//! Marketplace Reconciler - Provider webhooks and state reconciliation
//!
//! This crate keeps a freelance marketplace's records in step with three
//! external providers: Stripe checkouts and payment webhooks, Didit identity
//! verification sessions and webhooks, and Stream chat channels provisioned
//! when a proposal is accepted.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
