//! Marketplace Reconciler server entry point.

use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use marketplace_reconciler::adapters::didit::{DiditClient, DiditConfig};
use marketplace_reconciler::adapters::http::{api_router, AppDependencies, AppState};
use marketplace_reconciler::adapters::memory::{
    InMemoryConversationRepository, InMemoryPaymentRepository, InMemoryProjectRepository,
    InMemoryProposalRepository, InMemoryUserRepository,
};
use marketplace_reconciler::adapters::postgres::{
    PostgresConversationRepository, PostgresPaymentRepository, PostgresProjectRepository,
    PostgresProposalRepository, PostgresUserRepository,
};
use marketplace_reconciler::adapters::stream::{StreamClient, StreamConfig};
use marketplace_reconciler::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use marketplace_reconciler::adapters::JwtSessionValidator;
use marketplace_reconciler::config::{
    AppConfig, ConfigError, DatabaseConfig, ServerConfig, ValidationError,
};
use marketplace_reconciler::ports::{
    ConversationRepository, PaymentRepository, ProjectRepository, ProposalRepository,
    ProviderError, UserRepository,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Provider client setup failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

struct Stores {
    payments: Arc<dyn PaymentRepository>,
    users: Arc<dyn UserRepository>,
    projects: Arc<dyn ProjectRepository>,
    proposals: Arc<dyn ProposalRepository>,
    conversations: Arc<dyn ConversationRepository>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("marketplace-reconciler: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let stores = connect_stores(&config.database).await?;

    let stripe = StripeConfig::new(
        config.stripe.secret_key.expose_secret().as_str(),
        config.stripe.webhook_secret.expose_secret().as_str(),
        config.stripe.success_url.as_str(),
        config.stripe.cancel_url.as_str(),
    );
    let stripe = match &config.stripe.api_base_url {
        Some(url) => stripe.with_base_url(url.as_str()),
        None => stripe,
    };

    let didit = DiditConfig::new(
        config.didit.api_key.expose_secret().as_str(),
        config.didit.workflow_id.as_str(),
    )
    .with_base_url(config.didit.api_base_url.as_str());

    let stream = StreamConfig::new(
        config.stream.api_key.as_str(),
        config.stream.api_secret.expose_secret().as_str(),
    );
    let stream = match &config.stream.api_base_url {
        Some(url) => stream.with_base_url(url.as_str()),
        None => stream,
    };

    let callback_base_url = config
        .verification_callback_base_url()
        .ok_or(ValidationError::MissingRequired("DIDIT__CALLBACK_BASE_URL"))?
        .to_string();

    let state = AppState::new(AppDependencies {
        payments: stores.payments,
        users: stores.users,
        projects: stores.projects,
        proposals: stores.proposals,
        conversations: stores.conversations,
        payment_provider: Arc::new(StripePaymentAdapter::new(stripe)?),
        identity_provider: Arc::new(DiditClient::new(didit)?),
        messaging_provider: Arc::new(StreamClient::new(stream)?),
        fee_percent: config.stripe.fee_percent()?,
        verification_callback_base_url: callback_base_url,
        verification_webhook_secret: config.didit.webhook_secret.clone(),
    });
    let validator = Arc::new(JwtSessionValidator::new(&config.auth.jwt_secret));

    let request_id = http::HeaderName::from_static(REQUEST_ID_HEADER);
    let app = api_router(state, validator)
        .layer(cors_layer(&config.server))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        stripe_test_mode = config.stripe.is_test_mode(),
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, pretty logs elsewhere. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().pretty()).init();
    }
}

async fn connect_stores(database: &DatabaseConfig) -> Result<Stores, StartupError> {
    if database.is_in_memory() {
        tracing::warn!("Using in-memory record stores; data is lost on restart");
        return Ok(Stores {
            payments: Arc::new(InMemoryPaymentRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            proposals: Arc::new(InMemoryProposalRepository::new()),
            conversations: Arc::new(InMemoryConversationRepository::new()),
        });
    }

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Stores {
        payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
        proposals: Arc::new(PostgresProposalRepository::new(pool.clone())),
        conversations: Arc::new(PostgresConversationRepository::new(pool)),
    })
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<http::HeaderValue> = server
        .cors_origins()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
