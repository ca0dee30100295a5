//! In-memory payment repository.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, Timestamp};
use crate::domain::payment::{NewPayment, Payment};
use crate::ports::PaymentRepository;

/// In-memory storage for payments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
    fail_updates: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `update` fail with a database error.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `create` and `update` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Returns a payment regardless of its soft-delete flag.
    pub async fn get(&self, id: &PaymentId) -> Option<Payment> {
        self.payments.read().await.get(id).cloned()
    }

    pub async fn all(&self) -> Vec<Payment> {
        self.payments.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, payment: NewPayment) -> Result<Payment, DomainError> {
        let id = PaymentId::new(uuid::Uuid::new_v4().to_string())?;
        let payment = payment.into_payment(id.clone(), Timestamp::now());
        self.payments.write().await.insert(id, payment.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(payment)
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .payments
            .read()
            .await
            .get(id)
            .filter(|p| !p.is_deleted)
            .cloned())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::database("payment store unavailable"));
        }

        let mut payments = self.payments.write().await;
        let stored = payments.get_mut(&payment.id).ok_or_else(|| {
            DomainError::new(ErrorCode::NotFound, format!("Payment not found: {}", payment.id))
        })?;
        *stored = payment.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
