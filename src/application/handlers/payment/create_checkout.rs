//! CreateCheckoutHandler - Opens a hosted checkout for a client paying a freelancer.
//!
//! Two-step saga:
//! 1. Persist a `created` payment.
//! 2. Open the provider checkout session.
//!
//! If step 2 fails the compensation marks the payment `failed`.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, PaymentId, ProjectId, UserId};
use crate::domain::payment::{
    normalize_currency, platform_fee, CheckoutError, FeePercent, NewPayment, Payment,
};
use crate::ports::{
    CreateCheckoutRequest, PaymentProvider, PaymentRepository, ProjectRepository, UserRepository,
};

/// Command to open a checkout.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub project_id: String,
    pub freelancer_id: String,
    /// Minor currency units.
    pub amount: i64,
    pub currency: Option<String>,
}

/// Result of a successfully opened checkout.
#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub checkout_url: String,
    pub payment_id: PaymentId,
}

/// Handler for opening checkouts.
pub struct CreateCheckoutHandler {
    payments: Arc<dyn PaymentRepository>,
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
    provider: Arc<dyn PaymentProvider>,
    fee_percent: FeePercent,
}

impl CreateCheckoutHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserRepository>,
        provider: Arc<dyn PaymentProvider>,
        fee_percent: FeePercent,
    ) -> Self {
        Self {
            payments,
            projects,
            users,
            provider,
            fee_percent,
        }
    }

    pub async fn handle(
        &self,
        caller: &AuthenticatedUser,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, CheckoutError> {
        // 1. Validate the request
        if !caller.is_client() {
            return Err(CheckoutError::forbidden("only clients can open a checkout"));
        }
        if cmd.amount <= 0 {
            return Err(CheckoutError::validation("amount", "must be greater than zero"));
        }
        let project_id = ProjectId::new(cmd.project_id)?;
        let freelancer_id = UserId::new(cmd.freelancer_id)?;
        let currency = normalize_currency(cmd.currency.as_deref())?;

        // 2. Check the project and the payee
        let project = self
            .projects
            .find_by_id(&project_id)
            .await?
            .filter(|p| !p.is_deleted)
            .ok_or(CheckoutError::ProjectNotFound)?;
        if !project.is_owned_by(&caller.id) {
            return Err(CheckoutError::forbidden("project belongs to another client"));
        }

        let freelancer = self
            .users
            .find_by_id(&freelancer_id)
            .await?
            .ok_or(CheckoutError::FreelancerNotFound)?;
        if !freelancer.is_active_freelancer() {
            return Err(CheckoutError::InvalidFreelancer);
        }

        // 3. Persist the attempt
        let fee = platform_fee(cmd.amount, self.fee_percent);
        let mut payment = self
            .payments
            .create(NewPayment {
                client_id: caller.id.clone(),
                freelancer_id: freelancer_id.clone(),
                project_id: project_id.clone(),
                amount: cmd.amount,
                currency: currency.clone(),
            })
            .await?;

        tracing::info!(
            payment_id = %payment.id,
            project_id = %project_id,
            amount = cmd.amount,
            currency = %currency,
            platform_fee = fee,
            "Payment created, opening checkout session"
        );

        // 4. Open the provider session
        let request = CreateCheckoutRequest {
            payment_id: payment.id.clone(),
            client_id: caller.id.clone(),
            freelancer_id,
            project_id,
            project_title: project.title,
            amount: cmd.amount,
            currency,
            platform_fee_percent: self.fee_percent,
            platform_fee_amount: fee,
        };

        let session = match self.provider.create_checkout_session(request).await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(
                    payment_id = %payment.id,
                    error = %err,
                    retryable = err.code.is_retryable(),
                    "Checkout session creation failed"
                );
                self.compensate(&mut payment).await;
                return Err(CheckoutError::Upstream(err.to_string()));
            }
        };

        // 5. Remember the session; webhooks correlate by payment id, so this is best-effort
        payment.attach_checkout_session(session.id.clone());
        if let Err(err) = self.payments.update(&payment).await {
            tracing::error!(
                payment_id = %payment.id,
                checkout_session_id = %session.id,
                error = %err,
                "Failed to store checkout session id"
            );
        }

        Ok(CreateCheckoutResult {
            checkout_url: session.url,
            payment_id: payment.id,
        })
    }

    /// Marks the payment failed after the provider call failed. Not retried.
    async fn compensate(&self, payment: &mut Payment) {
        payment.mark_failed();
        if let Err(err) = self.payments.update(payment).await {
            tracing::error!(
                payment_id = %payment.id,
                error = %err,
                "Failed to mark payment as failed after checkout error"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryPaymentRepository, InMemoryProjectRepository, InMemoryUserRepository,
    };
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::application::handlers::test_support::{self, CLIENT_ID, FREELANCER_ID, PROJECT_ID};
    use crate::domain::foundation::Role;
    use crate::domain::payment::PaymentStatus;
    use crate::ports::ProviderError;

    struct Fixture {
        payments: InMemoryPaymentRepository,
        projects: InMemoryProjectRepository,
        users: InMemoryUserRepository,
        provider: Arc<MockPaymentProvider>,
        handler: CreateCheckoutHandler,
    }

    async fn fixture() -> Fixture {
        let payments = InMemoryPaymentRepository::new();
        let projects = InMemoryProjectRepository::new();
        let users = InMemoryUserRepository::new();
        let provider = Arc::new(MockPaymentProvider::new());

        users.insert(test_support::client()).await;
        users.insert(test_support::freelancer()).await;
        projects.insert(test_support::project()).await;

        let handler = CreateCheckoutHandler::new(
            Arc::new(payments.clone()),
            Arc::new(projects.clone()),
            Arc::new(users.clone()),
            provider.clone(),
            FeePercent::new(10.0).unwrap(),
        );

        Fixture {
            payments,
            projects,
            users,
            provider,
            handler,
        }
    }

    fn caller(id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(id).unwrap(), role)
    }

    fn command(amount: i64) -> CreateCheckoutCommand {
        CreateCheckoutCommand {
            project_id: PROJECT_ID.to_string(),
            freelancer_id: FREELANCER_ID.to_string(),
            amount,
            currency: None,
        }
    }

    #[tokio::test]
    async fn one_hundred_dollars_at_ten_percent() {
        let f = fixture().await;

        let result = f
            .handler
            .handle(&caller(CLIENT_ID, Role::Client), command(10_000))
            .await
            .unwrap();

        assert!(result.checkout_url.contains("cs_test_1"));

        let payment = f.payments.get(&result.payment_id).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Created);
        assert_eq!(payment.amount, 10_000);
        assert_eq!(payment.currency, "usd");
        assert_eq!(payment.checkout_session_id.as_deref(), Some("cs_test_1"));

        let requests = f.provider.checkout_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].platform_fee_amount, 1_000);
        assert_eq!(requests[0].platform_fee_percent.to_string(), "10");
        assert_eq!(requests[0].payment_id, result.payment_id);
        assert_eq!(requests[0].project_title, "Landing page redesign");
    }

    #[tokio::test]
    async fn provider_failure_marks_payment_failed() {
        let f = fixture().await;
        f.provider
            .fail_next_checkout(ProviderError::invalid_request("No such price"));

        let err = f
            .handler
            .handle(&caller(CLIENT_ID, Role::Client), command(10_000))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Upstream(_)));
        let payments = f.payments.all().await;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].status, PaymentStatus::Failed);
        assert!(payments[0].checkout_session_id.is_none());
    }

    #[tokio::test]
    async fn compensation_failure_still_surfaces_upstream_error() {
        let f = fixture().await;
        f.provider.fail_next_checkout(ProviderError::timeout("5s elapsed"));
        f.payments.fail_updates(true);

        let err = f
            .handler
            .handle(&caller(CLIENT_ID, Role::Client), command(10_000))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Upstream(_)));
        assert_eq!(f.payments.all().await[0].status, PaymentStatus::Created);
    }

    #[tokio::test]
    async fn currency_is_normalized() {
        let f = fixture().await;
        let mut cmd = command(500);
        cmd.currency = Some("EUR".to_string());

        let result = f
            .handler
            .handle(&caller(CLIENT_ID, Role::Client), cmd)
            .await
            .unwrap();

        assert_eq!(f.payments.get(&result.payment_id).await.unwrap().currency, "eur");
    }

    #[tokio::test]
    async fn freelancer_caller_is_forbidden() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(&caller(FREELANCER_ID, Role::Freelancer), command(10_000))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Forbidden(_)));
        assert!(f.payments.all().await.is_empty());
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let f = fixture().await;
        for amount in [0, -100] {
            let err = f
                .handler
                .handle(&caller(CLIENT_ID, Role::Client), command(amount))
                .await
                .unwrap_err();
            assert!(matches!(err, CheckoutError::Validation { ref field, .. } if field == "amount"));
        }
        assert!(f.provider.checkout_requests().is_empty());
    }

    #[tokio::test]
    async fn missing_ids_are_rejected() {
        let f = fixture().await;
        let mut cmd = command(100);
        cmd.project_id = String::new();

        let err = f
            .handler
            .handle(&caller(CLIENT_ID, Role::Client), cmd)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn project_of_another_client_is_forbidden() {
        let f = fixture().await;
        f.users.insert(test_support::user("client-2", Role::Client)).await;

        let err = f
            .handler
            .handle(&caller("client-2", Role::Client), command(100))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Forbidden(_)));
    }

    #[tokio::test]
    async fn deleted_project_is_not_found() {
        let f = fixture().await;
        let mut project = test_support::project();
        project.is_deleted = true;
        f.projects.insert(project).await;

        let err = f
            .handler
            .handle(&caller(CLIENT_ID, Role::Client), command(100))
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::ProjectNotFound);
    }

    #[tokio::test]
    async fn payee_must_be_an_active_freelancer() {
        let f = fixture().await;

        let mut cmd = command(100);
        cmd.freelancer_id = "nobody".to_string();
        let err = f
            .handler
            .handle(&caller(CLIENT_ID, Role::Client), cmd)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::FreelancerNotFound);

        let mut cmd = command(100);
        cmd.freelancer_id = CLIENT_ID.to_string();
        let err = f
            .handler
            .handle(&caller(CLIENT_ID, Role::Client), cmd)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::InvalidFreelancer);

        let mut deleted = test_support::freelancer();
        deleted.is_deleted = true;
        f.users.insert(deleted).await;
        let err = f
            .handler
            .handle(&caller(CLIENT_ID, Role::Client), command(100))
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::InvalidFreelancer);
    }
}
