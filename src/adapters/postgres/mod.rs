//! PostgreSQL adapters - Database implementations for record store ports.
//!
//! Schema lives in `migrations/` and is applied at startup with
//! `sqlx::migrate!`.

mod conversation_repository;
mod payment_repository;
mod project_repository;
mod proposal_repository;
mod rows;
mod user_repository;

pub use conversation_repository::PostgresConversationRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use project_repository::PostgresProjectRepository;
pub use proposal_repository::PostgresProposalRepository;
pub use user_repository::PostgresUserRepository;
