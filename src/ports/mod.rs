//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Record Store Ports
//!
//! - `PaymentRepository` - Checkout attempts
//! - `UserRepository` - Accounts and their verification state
//! - `ProjectRepository` - Projects (read side)
//! - `ProposalRepository` - Proposals and their status
//! - `ConversationRepository` - Proposal-to-channel mappings (unique per proposal)
//!
//! ## Provider Ports
//!
//! - `PaymentProvider` - Hosted checkout (Stripe)
//! - `IdentityProvider` - Identity verification sessions (Didit)
//! - `MessagingProvider` - Chat users, channels, tokens (Stream)
//!
//! ## Authentication Ports
//!
//! - `SessionValidator` - Bearer token validation

mod conversation_repository;
mod identity_provider;
mod messaging_provider;
mod payment_provider;
mod payment_repository;
mod project_repository;
mod proposal_repository;
mod provider_error;
mod session_validator;
mod user_repository;

pub use conversation_repository::ConversationRepository;
pub use identity_provider::{CreateVerificationRequest, IdentityProvider, VerificationSession};
pub use messaging_provider::MessagingProvider;
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentEvent, PaymentEventKind, PaymentProvider,
};
pub use payment_repository::PaymentRepository;
pub use project_repository::ProjectRepository;
pub use proposal_repository::ProposalRepository;
pub use provider_error::{ProviderError, ProviderErrorCode};
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;
