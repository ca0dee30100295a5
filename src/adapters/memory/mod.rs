//! In-memory record store adapters.
//!
//! Used by tests and by local development (`database.url = "memory://"`).

mod conversation_repository;
mod payment_repository;
mod project_repository;
mod proposal_repository;
mod user_repository;

pub use conversation_repository::InMemoryConversationRepository;
pub use payment_repository::InMemoryPaymentRepository;
pub use project_repository::InMemoryProjectRepository;
pub use proposal_repository::InMemoryProposalRepository;
pub use user_repository::InMemoryUserRepository;
