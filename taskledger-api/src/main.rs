//! # TaskLedger API Server
//!
//! Serves the project/task/time-log API over HTTP.
//!
//! ## Startup
//!
//! 1. Load configuration (`.env` + environment)
//! 2. Initialise tracing
//! 3. Open the Postgres pool and apply migrations
//! 4. Serve until Ctrl-C, then drain and close the pool
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskledger cargo run -p taskledger-api
//! ```

use anyhow::Context;
use std::sync::Arc;
use taskledger_api::{
    app::{build_router, AppState},
    config::Config,
    telemetry::init_tracing,
};
use taskledger_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, PoolSettings},
    },
    store::postgres::PgStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(
        config.log_format,
        "taskledger_api=info,taskledger_shared=info,tower_http=info",
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        identity_policy = %config.identity_policy,
        "TaskLedger API server starting"
    );

    let pool = create_pool(PoolSettings {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await
    .context("failed to connect to the database")?;

    run_migrations(&pool).await.context("failed to run migrations")?;

    let bind_address = config.bind_address();
    let state = AppState::new(Arc::new(PgStore::new(pool.clone())), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
