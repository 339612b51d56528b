use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_search::{PgSearchRepository, SearchRepository};
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
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    // Redis is optional: the search cache degrades to its in-process tier
    // when no Redis is configured or the connection fails at startup.
    let redis = match config.redis.clone() {
        Some(redis_config) => {
            match database::redis::connect_from_config_with_retry(redis_config, None).await {
                Ok(manager) => {
                    info!("Redis connected successfully");
                    Some(manager)
                }
                Err(e) => {
                    tracing::warn!("Redis unavailable, search cache is local-only: {}", e);
                    None
                }
            }
        }
        None => None,
    };

    database::postgres::run_migrations::<migration::Migrator>(&db)
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    // Probe the full-text index once at startup; queries fall back to
    // pattern matching when it is absent.
    let supports_text_search = PgSearchRepository::new(db.clone()).has_text_index().await;
    info!(supports_text_search, "Search capabilities detected");

    let verifier = axum_helpers::JwtVerifier::new(&config.jwt);

    // Initialize the application state with database connections
    let state = AppState {
        config,
        db,
        redis,
        verifier,
        supports_text_search,
    };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check with actual db/redis health checks
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!("Starting bazaar API with production-ready shutdown (30s timeout)");

    // Production-ready server with graceful shutdown and cleanup
    // State moves here for cleanup
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30), // 30s graceful shutdown timeout
        async move {
            info!("Shutting down: closing database connections");

            axum_helpers::close_postgres(state.db, "bazaar").await;
            if let Some(redis) = state.redis {
                axum_helpers::close_redis(redis, "bazaar").await;
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Bazaar API shutdown complete");
    Ok(())
}
