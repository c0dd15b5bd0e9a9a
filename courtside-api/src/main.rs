use std::net::SocketAddr;

use anyhow::Context;
use courtside_api::{app, AppState};
use courtside_core::ReservationRules;
use courtside_store::app_config::{Config, StorageBackend};
use courtside_store::DbClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courtside_api=debug,courtside_core=debug,courtside_store=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    let rules = ReservationRules::from(&config.reservation);
    tracing::info!(
        "Starting Courtside API on port {} ({:?} storage, {}-minute slots)",
        config.server.port,
        config.storage.backend,
        rules.slot_minutes
    );

    let state = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = DbClient::new(&config.database)
                .await
                .context("Failed to connect to Postgres")?;
            if config.database.run_migrations {
                db.migrate().await.context("Failed to run migrations")?;
            }
            AppState::postgres(&db, rules)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; bookings are lost on restart");
            AppState::in_memory(rules)
        }
    };

    let app = app(state.with_prefix(config.server.api_prefix.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
