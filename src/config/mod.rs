//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RECONCILER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use marketplace_reconciler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod chat;
mod database;
mod error;
mod payment;
mod server;
mod verification;

pub use auth::AuthConfig;
pub use chat::ChatConfig;
pub use database::{DatabaseConfig, IN_MEMORY_DATABASE_URL};
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use verification::VerificationConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Record store (PostgreSQL or in-memory)
    pub database: DatabaseConfig,

    /// Session token validation
    pub auth: AuthConfig,

    /// Payment provider (Stripe)
    pub stripe: PaymentConfig,

    /// Identity verification provider (Didit)
    pub didit: VerificationConfig,

    /// Messaging provider (Stream)
    pub stream: ChatConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `RECONCILER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `RECONCILER__STRIPE__SECRET_KEY=...` -> `stripe.secret_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RECONCILER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.stripe.validate()?;
        self.didit.validate(self.server.public_url.as_deref())?;
        self.stream.validate()?;
        Ok(())
    }

    /// Base URL identity provider callbacks are built from.
    pub fn verification_callback_base_url(&self) -> Option<&str> {
        self.didit
            .callback_base_url(self.server.public_url.as_deref())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
