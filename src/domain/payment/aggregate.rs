//! Payment aggregate entity.
//!
//! A Payment records one checkout attempt by a client for a freelancer's work
//! on a project. It is created synchronously by checkout and afterwards only
//! mutated by the checkout compensation and the provider webhook reconciler.
//!
//! # Design Decisions
//!
//! - **Money in minor units**: `amount` is an i64 count of cents (not floats)
//! - **Store-assigned ids**: the record store allocates `id` on insert
//! - **Soft delete only**: payments are never hard-deleted

use crate::domain::foundation::{PaymentId, ProjectId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::{PaymentStatus, StatusChange};

/// Payment aggregate - one checkout attempt.
///
/// # Invariants
///
/// - `amount > 0`
/// - `currency` is a lowercase ISO code
/// - `status` moves only created→paid, created→failed, or stays equal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub client_id: UserId,
    pub freelancer_id: UserId,
    pub project_id: ProjectId,

    /// Amount charged, in minor currency units.
    pub amount: i64,

    /// Lowercase ISO 4217 code.
    pub currency: String,

    pub status: PaymentStatus,

    /// Hosted checkout session at the payment provider, once opened.
    pub checkout_session_id: Option<String>,

    /// Payment intent reported by the provider's webhooks.
    pub payment_intent_id: Option<String>,

    pub is_deleted: bool,
    pub created_at: Timestamp,
}

/// Fields supplied when inserting a payment; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub client_id: UserId,
    pub freelancer_id: UserId,
    pub project_id: ProjectId,
    pub amount: i64,
    pub currency: String,
}

impl NewPayment {
    /// Materializes the record the store persists under `id`.
    pub fn into_payment(self, id: PaymentId, created_at: Timestamp) -> Payment {
        Payment {
            id,
            client_id: self.client_id,
            freelancer_id: self.freelancer_id,
            project_id: self.project_id,
            amount: self.amount,
            currency: self.currency,
            status: PaymentStatus::Created,
            checkout_session_id: None,
            payment_intent_id: None,
            is_deleted: false,
            created_at,
        }
    }
}

impl Payment {
    /// Applies a provider-reported outcome.
    ///
    /// Only an [`StatusChange::Apply`] result mutates the payment; the intent
    /// id is recorded alongside the new status when the provider sent one.
    pub fn record_outcome(
        &mut self,
        target: PaymentStatus,
        payment_intent_id: Option<&str>,
    ) -> StatusChange {
        let change = self.status.change_to(target);
        if change == StatusChange::Apply {
            self.status = target;
            if let Some(intent) = payment_intent_id.filter(|id| !id.is_empty()) {
                self.payment_intent_id = Some(intent.to_string());
            }
        }
        change
    }

    /// Compensation for a checkout whose provider call failed.
    pub fn mark_failed(&mut self) -> StatusChange {
        self.record_outcome(PaymentStatus::Failed, None)
    }

    pub fn attach_checkout_session(&mut self, session_id: impl Into<String>) {
        self.checkout_session_id = Some(session_id.into());
    }
}
