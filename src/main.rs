//! Ludoteca server binary.
//!
//! Loads configuration, connects to PostgreSQL, wires the adapters into the
//! application state, and serves the HTTP API.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ludoteca::adapters::auth::IdentitySessionValidator;
use ludoteca::adapters::http::{build_router, AppState};
use ludoteca::adapters::postgres::{
    PostgresGameCatalog, PostgresNotificationPreferencesRepository, PostgresPurchaseRepository,
    PostgresReleaseNotifyRepository, PostgresRentalRepository, PostgresSessionRepository,
    PostgresSupportTicketRepository,
};
use ludoteca::config::AppConfig;
use ludoteca::domain::webhook::SignatureVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.server.log_level)
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting ludoteca backend"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    if !config.payment.enforces_signatures() {
        tracing::warn!("Webhook secret not configured; accepting unsigned webhooks");
    }

    let state = AppState {
        catalog: Arc::new(PostgresGameCatalog::new(pool.clone())),
        sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
        rentals: Arc::new(PostgresRentalRepository::new(pool.clone())),
        purchases: Arc::new(PostgresPurchaseRepository::new(pool.clone())),
        tickets: Arc::new(PostgresSupportTicketRepository::new(pool.clone())),
        release_notify: Arc::new(PostgresReleaseNotifyRepository::new(pool.clone())),
        preferences: Arc::new(PostgresNotificationPreferencesRepository::new(pool.clone())),
        session_validator: Arc::new(IdentitySessionValidator::new(&config.identity)?),
        signature_verifier: Arc::new(SignatureVerifier::from_config(
            config.payment.webhook_secret.as_ref(),
        )),
        payment_app_id: config.payment.app_id.clone(),
        identity_configured: config.identity.is_configured(),
    };

    let app = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await?;

    Ok(())
}
