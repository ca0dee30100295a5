//! HandlePaymentWebhookHandler - Reconciles payment status from provider webhooks.
//!
//! Events are verified and decoded by the payment provider port, then
//! correlated to a payment through the `payment_id` metadata attached at
//! checkout. Redeliveries of an already-applied outcome are no-ops.

use std::sync::Arc;

use crate::domain::foundation::{PaymentId, Timestamp};
use crate::domain::payment::{PaymentStatus, PaymentWebhookError, StatusChange};
use crate::ports::{PaymentProvider, PaymentRepository};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload, exactly as received.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header value.
    pub signature: String,
}

/// Result of webhook processing. Every variant is acknowledged with 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// The payment moved to a new status.
    Updated {
        payment_id: PaymentId,
        status: PaymentStatus,
    },
    /// The payment already had the reported status; nothing was written.
    AlreadyApplied { payment_id: PaymentId },
    /// The event would reverse a terminal status; nothing was written.
    ReversalIgnored {
        payment_id: PaymentId,
        stored: PaymentStatus,
        reported: PaymentStatus,
    },
}

/// Handler for processing payment provider webhooks.
pub struct HandlePaymentWebhookHandler {
    payments: Arc<dyn PaymentRepository>,
    provider: Arc<dyn PaymentProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, provider: Arc<dyn PaymentProvider>) -> Self {
        Self { payments, provider }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, PaymentWebhookError> {
        // 1. Verify signature and decode
        let now = Timestamp::now().as_unix_secs();
        let event = self
            .provider
            .verify_webhook(&cmd.payload, &cmd.signature, now)
            .map_err(|err| {
                tracing::warn!(error = %err, "Payment webhook rejected");
                err
            })?;

        tracing::info!(event_id = %event.id, event_type = %event.kind.as_str(), "Payment webhook received");

        // 2. Map the event onto a target status
        let target = event.kind.target_status().ok_or_else(|| {
            tracing::info!(event_type = %event.kind.as_str(), "Unhandled payment event type");
            PaymentWebhookError::UnhandledEventType(event.kind.as_str().to_string())
        })?;

        let payment_id = event
            .payment_id
            .as_deref()
            .and_then(|id| PaymentId::new(id).ok())
            .ok_or_else(|| {
                tracing::warn!(event_id = %event.id, "Payment event without payment_id metadata");
                PaymentWebhookError::MissingPaymentId
            })?;

        // 3. Load and transition
        let mut payment = self
            .payments
            .find_by_id(&payment_id)
            .await?
            .ok_or_else(|| PaymentWebhookError::PaymentNotFound(payment_id.clone()))?;

        let stored = payment.status;
        match payment.record_outcome(target, event.payment_intent_id.as_deref()) {
            StatusChange::Unchanged => {
                tracing::info!(payment_id = %payment_id, status = %stored, "Payment status already applied");
                Ok(HandlePaymentWebhookResult::AlreadyApplied { payment_id })
            }
            StatusChange::Rejected => {
                tracing::warn!(
                    payment_id = %payment_id,
                    stored = %stored,
                    reported = %target,
                    event_id = %event.id,
                    "Ignoring payment event that would reverse a terminal status"
                );
                Ok(HandlePaymentWebhookResult::ReversalIgnored {
                    payment_id,
                    stored,
                    reported: target,
                })
            }
            StatusChange::Apply => {
                self.payments.update(&payment).await.map_err(|err| {
                    tracing::error!(payment_id = %payment_id, error = %err, "Failed to persist payment status");
                    PaymentWebhookError::from(err)
                })?;
                tracing::info!(payment_id = %payment_id, from = %stored, to = %target, "Payment status updated");
                Ok(HandlePaymentWebhookResult::Updated {
                    payment_id,
                    status: target,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPaymentRepository;
    use crate::adapters::stripe::{MockPaymentProvider, MOCK_WEBHOOK_SECRET};
    use crate::domain::foundation::{ProjectId, UserId};
    use crate::domain::payment::NewPayment;
    use crate::domain::webhook::{sign_stripe_payload_for_test, SignatureError};

    struct Fixture {
        payments: InMemoryPaymentRepository,
        handler: HandlePaymentWebhookHandler,
        payment_id: PaymentId,
    }

    async fn fixture() -> Fixture {
        let payments = InMemoryPaymentRepository::new();
        let payment = payments
            .create(NewPayment {
                client_id: UserId::new("client-1").unwrap(),
                freelancer_id: UserId::new("freelancer-1").unwrap(),
                project_id: ProjectId::new("project-1").unwrap(),
                amount: 10_000,
                currency: "usd".to_string(),
            })
            .await
            .unwrap();

        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(payments.clone()),
            Arc::new(MockPaymentProvider::new()),
        );

        Fixture {
            payments,
            handler,
            payment_id: payment.id,
        }
    }

    fn event_body(event_type: &str, object: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "id": "evt_1",
            "type": event_type,
            "created": 1_760_000_000,
            "livemode": false,
            "data": { "object": object }
        }))
        .unwrap()
    }

    fn checkout_completed(payment_id: &str) -> Vec<u8> {
        event_body(
            "checkout.session.completed",
            serde_json::json!({
                "id": "cs_test_1",
                "payment_intent": "pi_123",
                "metadata": { "payment_id": payment_id }
            }),
        )
    }

    fn intent_event(event_type: &str, payment_id: &str) -> Vec<u8> {
        event_body(
            event_type,
            serde_json::json!({ "id": "pi_123", "metadata": { "payment_id": payment_id } }),
        )
    }

    fn signed(payload: Vec<u8>) -> HandlePaymentWebhookCommand {
        let now = Timestamp::now().as_unix_secs();
        HandlePaymentWebhookCommand {
            signature: sign_stripe_payload_for_test(MOCK_WEBHOOK_SECRET, now, &payload),
            payload,
        }
    }

    #[tokio::test]
    async fn checkout_completed_marks_paid_with_intent() {
        let f = fixture().await;

        let result = f
            .handler
            .handle(signed(checkout_completed(f.payment_id.as_str())))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandlePaymentWebhookResult::Updated {
                payment_id: f.payment_id.clone(),
                status: PaymentStatus::Paid
            }
        );
        let payment = f.payments.get(&f.payment_id).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.payment_intent_id.as_deref(), Some("pi_123"));
    }

    #[tokio::test]
    async fn redelivery_is_a_no_op() {
        let f = fixture().await;
        let body = checkout_completed(f.payment_id.as_str());
        f.handler.handle(signed(body.clone())).await.unwrap();
        let writes = f.payments.write_count();
        let before = f.payments.get(&f.payment_id).await.unwrap();

        let result = f.handler.handle(signed(body)).await.unwrap();

        assert!(matches!(result, HandlePaymentWebhookResult::AlreadyApplied { .. }));
        assert_eq!(f.payments.write_count(), writes);
        assert_eq!(f.payments.get(&f.payment_id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn intent_succeeded_after_checkout_completed_is_a_no_op() {
        let f = fixture().await;
        f.handler
            .handle(signed(checkout_completed(f.payment_id.as_str())))
            .await
            .unwrap();

        let result = f
            .handler
            .handle(signed(intent_event("payment_intent.succeeded", f.payment_id.as_str())))
            .await
            .unwrap();

        assert!(matches!(result, HandlePaymentWebhookResult::AlreadyApplied { .. }));
    }

    #[tokio::test]
    async fn payment_failed_marks_failed() {
        let f = fixture().await;
        f.handler
            .handle(signed(intent_event(
                "payment_intent.payment_failed",
                f.payment_id.as_str(),
            )))
            .await
            .unwrap();

        let payment = f.payments.get(&f.payment_id).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Failed);
        assert_eq!(payment.payment_intent_id.as_deref(), Some("pi_123"));
    }

    #[tokio::test]
    async fn failure_after_paid_is_acknowledged_without_reversal() {
        let f = fixture().await;
        f.handler
            .handle(signed(checkout_completed(f.payment_id.as_str())))
            .await
            .unwrap();

        let result = f
            .handler
            .handle(signed(intent_event(
                "payment_intent.payment_failed",
                f.payment_id.as_str(),
            )))
            .await
            .unwrap();

        assert!(matches!(result, HandlePaymentWebhookResult::ReversalIgnored { .. }));
        assert_eq!(
            f.payments.get(&f.payment_id).await.unwrap().status,
            PaymentStatus::Paid
        );
    }

    #[tokio::test]
    async fn unknown_event_type_is_rejected() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(signed(event_body("charge.refunded", serde_json::json!({}))))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            PaymentWebhookError::UnhandledEventType("charge.refunded".to_string())
        );
    }

    #[tokio::test]
    async fn missing_metadata_is_rejected() {
        let f = fixture().await;
        let body = event_body(
            "checkout.session.completed",
            serde_json::json!({ "id": "cs_test_1", "metadata": {} }),
        );

        let err = f.handler.handle(signed(body)).await.unwrap_err();

        assert_eq!(err, PaymentWebhookError::MissingPaymentId);
    }

    #[tokio::test]
    async fn unknown_payment_is_not_found() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(signed(checkout_completed("does-not-exist")))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentWebhookError::PaymentNotFound(_)));
    }

    #[tokio::test]
    async fn bad_signature_is_rejected_before_any_lookup() {
        let f = fixture().await;
        let mut cmd = signed(checkout_completed(f.payment_id.as_str()));
        cmd.payload.push(b' ');

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(
            err,
            PaymentWebhookError::InvalidSignature(SignatureError::InvalidSignature)
        );
        assert_eq!(
            f.payments.get(&f.payment_id).await.unwrap().status,
            PaymentStatus::Created
        );
    }

    #[tokio::test]
    async fn persistence_failure_is_retryable() {
        let f = fixture().await;
        f.payments.fail_updates(true);

        let err = f
            .handler
            .handle(signed(checkout_completed(f.payment_id.as_str())))
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }
}
