//! Top-level router: feature routes, health check and authentication.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::marketplace::marketplace_routes;
use super::middleware::{auth_middleware, AuthState};
use super::payment::payment_routes;
use super::state::AppState;
use super::verification::verification_routes;

/// GET /health - Liveness probe
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the application router.
///
/// The auth middleware only rejects malformed or invalid bearer tokens;
/// endpoints that need a caller enforce it with `RequireAuth`, so the
/// webhook routes stay reachable without a token.
pub fn api_router(state: AppState, validator: AuthState) -> Router {
    Router::new()
        .merge(payment_routes())
        .merge(verification_routes())
        .merge(marketplace_routes())
        .layer(from_fn_with_state(validator, auth_middleware))
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::didit::MockIdentityProvider;
    use crate::adapters::memory::{
        InMemoryConversationRepository, InMemoryPaymentRepository, InMemoryProjectRepository,
        InMemoryProposalRepository, InMemoryUserRepository,
    };
    use crate::adapters::stream::MockMessagingProvider;
    use crate::adapters::stripe::{MockPaymentProvider, MOCK_WEBHOOK_SECRET};
    use crate::adapters::http::state::AppDependencies;
    use crate::application::handlers::test_support::{
        client, freelancer, project, proposal, CLIENT_ID, FREELANCER_ID, PROJECT_ID, PROPOSAL_ID,
    };
    use crate::domain::foundation::{PaymentId, ProposalId, Role, Timestamp};
    use crate::domain::marketplace::ProposalStatus;
    use crate::domain::payment::{FeePercent, PaymentStatus};
    use crate::domain::webhook::{sign_stripe_payload_for_test, signature};
    use crate::ports::ProviderError;

    const VERIFICATION_SECRET: &str = "didit-webhook-secret";

    struct TestApp {
        router: Router,
        payments: InMemoryPaymentRepository,
        users: InMemoryUserRepository,
        proposals: InMemoryProposalRepository,
        conversations: InMemoryConversationRepository,
        messaging: Arc<MockMessagingProvider>,
    }

    async fn test_app() -> TestApp {
        test_app_with(MockPaymentProvider::new(), MockMessagingProvider::new()).await
    }

    async fn test_app_with(
        payment_provider: MockPaymentProvider,
        messaging: MockMessagingProvider,
    ) -> TestApp {
        let payments = InMemoryPaymentRepository::new();
        let users = InMemoryUserRepository::new();
        let projects = InMemoryProjectRepository::new();
        let proposals = InMemoryProposalRepository::new();
        let conversations = InMemoryConversationRepository::new();
        let messaging = Arc::new(messaging);

        users.insert(client()).await;
        users.insert(freelancer()).await;
        projects.insert(project()).await;
        proposals.insert(proposal(ProposalStatus::Sent)).await;

        let state = AppState::new(AppDependencies {
            payments: Arc::new(payments.clone()),
            users: Arc::new(users.clone()),
            projects: Arc::new(projects),
            proposals: Arc::new(proposals.clone()),
            conversations: Arc::new(conversations.clone()),
            payment_provider: Arc::new(payment_provider),
            identity_provider: Arc::new(MockIdentityProvider::new()),
            messaging_provider: messaging.clone(),
            fee_percent: FeePercent::new(10.0).unwrap(),
            verification_callback_base_url: "https://app.example.com/".to_string(),
            verification_webhook_secret: SecretString::new(VERIFICATION_SECRET.to_string()),
        });
        let validator = MockSessionValidator::new()
            .with_test_user("client-token", CLIENT_ID, Role::Client)
            .with_test_user("freelancer-token", FREELANCER_ID, Role::Freelancer);

        TestApp {
            router: api_router(state, Arc::new(validator)),
            payments,
            users,
            proposals,
            conversations,
            messaging,
        }
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = test_app().await;
        let response = app
            .router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn checkout_returns_url_and_payment_id() {
        let app = test_app().await;
        let request = json_request(
            "POST",
            "/checkout",
            Some("client-token"),
            json!({"project_id": PROJECT_ID, "freelancer_id": FREELANCER_ID, "amount": 10000}),
        );

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["checkout_url"].as_str().unwrap().starts_with("https://"));
        let payment_id = PaymentId::new(body["payment_id"].as_str().unwrap()).unwrap();
        let payment = app.payments.get(&payment_id).await.unwrap();
        assert_eq!(payment.amount, 10_000);
        assert_eq!(payment.currency, "usd");
    }

    #[tokio::test]
    async fn abandoned_checkout_still_compensates() {
        let provider = MockPaymentProvider::new().with_delay(Duration::from_millis(200));
        provider.fail_next_checkout(ProviderError::network("connection reset"));
        let app = test_app_with(provider, MockMessagingProvider::new()).await;
        let request = json_request(
            "POST",
            "/checkout",
            Some("client-token"),
            json!({"project_id": PROJECT_ID, "freelancer_id": FREELANCER_ID, "amount": 10000}),
        );

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), app.router.oneshot(request)).await;
        assert!(abandoned.is_err());
        tokio::time::sleep(Duration::from_millis(400)).await;

        let statuses: Vec<_> = app.payments.all().await.iter().map(|p| p.status).collect();
        assert_eq!(statuses, vec![PaymentStatus::Failed]);
    }

    #[tokio::test]
    async fn checkout_requires_authentication() {
        let app = test_app().await;
        let request = json_request(
            "POST",
            "/checkout",
            None,
            json!({"project_id": PROJECT_ID, "freelancer_id": FREELANCER_ID, "amount": 10000}),
        );

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(app.payments.all().await.is_empty());
    }

    #[tokio::test]
    async fn checkout_by_freelancer_is_forbidden() {
        let app = test_app().await;
        let request = json_request(
            "POST",
            "/checkout",
            Some("freelancer-token"),
            json!({"project_id": PROJECT_ID, "freelancer_id": FREELANCER_ID, "amount": 10000}),
        );

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error_code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn payment_webhook_without_signature_is_unauthorized() {
        let app = test_app().await;
        let request = Request::post("/payments/webhook")
            .body(Body::from(r#"{"id":"evt_1","type":"payment_intent.succeeded"}"#))
            .unwrap();

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn signed_payment_webhook_marks_payment_paid() {
        let app = test_app().await;
        let checkout = json_request(
            "POST",
            "/checkout",
            Some("client-token"),
            json!({"project_id": PROJECT_ID, "freelancer_id": FREELANCER_ID, "amount": 5000}),
        );
        let response = app.router.clone().oneshot(checkout).await.unwrap();
        let payment_id = body_json(response).await["payment_id"]
            .as_str()
            .unwrap()
            .to_string();

        let payload = json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": {"object": {
                "id": "cs_1",
                "payment_intent": "pi_1",
                "metadata": {"payment_id": payment_id}
            }}
        })
        .to_string();
        let header = sign_stripe_payload_for_test(
            MOCK_WEBHOOK_SECRET,
            Timestamp::now().as_unix_secs(),
            payload.as_bytes(),
        );
        let request = Request::post("/payments/webhook")
            .header("Stripe-Signature", header)
            .body(Body::from(payload))
            .unwrap();

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payment = app
            .payments
            .get(&PaymentId::new(payment_id).unwrap())
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.payment_intent_id.as_deref(), Some("pi_1"));
    }

    #[tokio::test]
    async fn verification_webhook_for_unknown_session_is_acknowledged() {
        let app = test_app().await;
        let body = json!({
            "session_id": "unknown-session",
            "status": "Approved",
            "webhook_type": "status.updated"
        })
        .to_string();
        let request = Request::post("/verify/webhook")
            .header("X-Timestamp", Timestamp::now().as_unix_secs().to_string())
            .header(
                "X-Signature-V2",
                signature::compute_signature(VERIFICATION_SECRET, body.as_bytes()),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Webhook processed");
        assert_eq!(app.users.verification_write_count(), 0);
    }

    #[tokio::test]
    async fn verification_webhook_with_bad_signature_is_unauthorized() {
        let app = test_app().await;
        let request = Request::post("/verify/webhook")
            .header("X-Timestamp", Timestamp::now().as_unix_secs().to_string())
            .header("X-Signature-V2", "deadbeef")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn start_verification_returns_session() {
        let app = test_app().await;
        let request = json_request("POST", "/verify/start", Some("freelancer-token"), json!({}));

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(!body["session_id"].as_str().unwrap().is_empty());
        assert!(!body["verification_url"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn accepting_a_proposal_provisions_its_conversation() {
        let app = test_app().await;
        let request = json_request(
            "PATCH",
            &format!("/proposals/{}", PROPOSAL_ID),
            Some("client-token"),
            json!({"status": "accepted"}),
        );

        let response = app.router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "accepted");
        assert_eq!(body["conversation"]["state"], "created");
        assert_eq!(app.conversations.all().await.len(), 1);
        assert_eq!(app.messaging.channels().len(), 1);

        let listing = Request::get("/chat/conversations")
            .header("Authorization", "Bearer freelancer-token")
            .body(Body::empty())
            .unwrap();
        let response = app.router.oneshot(listing).await.unwrap();
        let body = body_json(response).await;
        let conversations = body["conversations"].as_array().unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0]["counterpart"]["id"], CLIENT_ID);
    }

    #[tokio::test]
    async fn abandoned_acceptance_still_provisions() {
        let messaging = MockMessagingProvider::new().with_delay(Duration::from_millis(100));
        let app = test_app_with(MockPaymentProvider::new(), messaging).await;
        let request = json_request(
            "PATCH",
            &format!("/proposals/{}", PROPOSAL_ID),
            Some("client-token"),
            json!({"status": "accepted"}),
        );

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), app.router.oneshot(request)).await;
        assert!(abandoned.is_err());
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(app.conversations.all().await.len(), 1);
        assert_eq!(app.messaging.channels().len(), 1);
    }

    #[tokio::test]
    async fn unknown_proposal_is_not_found() {
        let app = test_app().await;
        let request = json_request(
            "PATCH",
            "/proposals/missing",
            Some("client-token"),
            json!({"status": "accepted"}),
        );

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(app
            .proposals
            .get(&ProposalId::new("missing").unwrap())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn chat_token_is_issued_for_caller() {
        let app = test_app().await;
        let request = json_request("POST", "/chat/token", Some("client-token"), json!({}));

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user_id"], CLIENT_ID);
        assert!(!body["token"].as_str().unwrap().is_empty());
    }
}
