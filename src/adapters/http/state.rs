//! Shared application state for the HTTP layer.

use std::sync::Arc;

use secrecy::SecretString;

use crate::application::handlers::marketplace::{
    IssueChatTokenHandler, ListConversationsHandler, ProvisionConversationHandler,
    UpdateProposalStatusHandler,
};
use crate::application::handlers::payment::{CreateCheckoutHandler, HandlePaymentWebhookHandler};
use crate::application::handlers::verification::{
    HandleVerificationWebhookHandler, StartVerificationHandler,
};
use crate::domain::payment::FeePercent;
use crate::ports::{
    ConversationRepository, IdentityProvider, MessagingProvider, PaymentProvider,
    PaymentRepository, ProjectRepository, ProposalRepository, UserRepository,
};

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<dyn PaymentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub proposals: Arc<dyn ProposalRepository>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub messaging_provider: Arc<dyn MessagingProvider>,
    /// Holds the per-proposal locks, so it lives as long as the state.
    pub provisioner: Arc<ProvisionConversationHandler>,
    pub fee_percent: FeePercent,
    pub verification_callback_base_url: String,
    pub verification_webhook_secret: SecretString,
}

/// Ports and settings [`AppState`] is built from.
pub struct AppDependencies {
    pub payments: Arc<dyn PaymentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub proposals: Arc<dyn ProposalRepository>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub messaging_provider: Arc<dyn MessagingProvider>,
    pub fee_percent: FeePercent,
    pub verification_callback_base_url: String,
    pub verification_webhook_secret: SecretString,
}

impl AppState {
    pub fn new(deps: AppDependencies) -> Self {
        let provisioner = Arc::new(ProvisionConversationHandler::new(
            deps.projects.clone(),
            deps.conversations.clone(),
            deps.messaging_provider.clone(),
        ));
        Self {
            payments: deps.payments,
            users: deps.users,
            projects: deps.projects,
            proposals: deps.proposals,
            conversations: deps.conversations,
            payment_provider: deps.payment_provider,
            identity_provider: deps.identity_provider,
            messaging_provider: deps.messaging_provider,
            provisioner,
            fee_percent: deps.fee_percent,
            verification_callback_base_url: deps.verification_callback_base_url,
            verification_webhook_secret: deps.verification_webhook_secret,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.payments.clone(),
            self.projects.clone(),
            self.users.clone(),
            self.payment_provider.clone(),
            self.fee_percent,
        )
    }

    pub fn payment_webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.payments.clone(), self.payment_provider.clone())
    }

    pub fn start_verification_handler(&self) -> StartVerificationHandler {
        StartVerificationHandler::new(
            self.users.clone(),
            self.identity_provider.clone(),
            &self.verification_callback_base_url,
        )
    }

    pub fn verification_webhook_handler(&self) -> HandleVerificationWebhookHandler {
        HandleVerificationWebhookHandler::new(
            self.users.clone(),
            self.verification_webhook_secret.clone(),
        )
    }

    pub fn update_proposal_handler(&self) -> UpdateProposalStatusHandler {
        UpdateProposalStatusHandler::new(self.proposals.clone(), self.provisioner.clone())
    }

    pub fn chat_token_handler(&self) -> IssueChatTokenHandler {
        IssueChatTokenHandler::new(self.messaging_provider.clone())
    }

    pub fn list_conversations_handler(&self) -> ListConversationsHandler {
        ListConversationsHandler::new(
            self.proposals.clone(),
            self.conversations.clone(),
            self.projects.clone(),
            self.users.clone(),
        )
    }
}
