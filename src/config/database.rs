//! Record store selection.
//!
//! `memory://` runs the service on in-process stores (local runs and
//! demos); any `postgres://` URL connects a pool and, unless disabled,
//! applies the bundled migrations.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// URL selecting the in-memory record store instead of PostgreSQL.
pub const IN_MEMORY_DATABASE_URL: &str = "memory://";

const MAX_POOL_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a query waits for a free pool connection.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url == IN_MEMORY_DATABASE_URL
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if self.is_in_memory() {
            return Ok(());
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 || self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres(max_connections: u32) -> DatabaseConfig {
        DatabaseConfig {
            url: "postgresql://reconciler@localhost/marketplace".to_string(),
            max_connections,
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: true,
        }
    }

    #[test]
    fn memory_url_skips_pool_checks() {
        let config = DatabaseConfig {
            url: IN_MEMORY_DATABASE_URL.to_string(),
            ..postgres(0)
        };
        assert!(config.is_in_memory());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_url_is_missing() {
        let config = DatabaseConfig {
            url: String::new(),
            ..postgres(10)
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }

    #[test]
    fn only_postgres_urls_are_accepted() {
        let config = DatabaseConfig {
            url: "sqlite://marketplace.db".to_string(),
            ..postgres(10)
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
        assert!(postgres(10).validate().is_ok());
    }

    #[test]
    fn pool_size_is_bounded() {
        assert_eq!(postgres(0).validate(), Err(ValidationError::InvalidPoolSize));
        assert_eq!(
            postgres(MAX_POOL_SIZE + 1).validate(),
            Err(ValidationError::InvalidPoolSize)
        );
        assert!(postgres(MAX_POOL_SIZE).validate().is_ok());
    }
}
