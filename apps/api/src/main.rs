//! Cafe API - REST server for the cafe ordering backend

use axum_helpers::server::{create_production_app, health_router};
use axum_helpers::JwtAuth;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL at {}", config.postgres.url());

    let db = connect_from_config_with_retry(config.postgres.clone(), None).await?;
    run_migrations::<Migrator>(&db, config.app.name).await?;

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        db,
    };

    let jwt_auth = JwtAuth::new(&state.config.jwt);

    // Build REST router
    let api_routes = api::routes(&state, jwt_auth);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.db.clone()));

    info!("Starting Cafe API on port {}", state.config.server.port);

    // Run server with graceful shutdown
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connections");
            if let Err(e) = state.db.close().await {
                tracing::error!("Error closing database connection: {:?}", e);
            } else {
                info!("PostgreSQL connection closed");
            }
        },
    )
    .await?;

    info!("Cafe API shutdown complete");
    Ok(())
}
