//! Payment repository port.
//!
//! # Design
//!
//! - **Store-assigned ids**: `create` returns the record with its new id
//! - **Single-record writes**: every write touches exactly one payment
//! - **Soft delete**: deleted payments are invisible to lookups

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PaymentId};
use crate::domain::payment::{NewPayment, Payment};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a new payment in status created.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, payment: NewPayment) -> Result<Payment, DomainError>;

    /// Find a live payment by id.
    ///
    /// Returns `None` if not found or soft-deleted.
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    /// Persist status and provider fields of an existing payment.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the payment doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, payment: &Payment) -> Result<(), DomainError>;
}
