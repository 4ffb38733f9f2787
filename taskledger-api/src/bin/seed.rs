//! # TaskLedger Seeder
//!
//! Applies migrations and loads the demo users, projects and tasks into an
//! empty database. Does nothing when users already exist.
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskledger cargo run -p taskledger-api --bin taskledger-seed
//! ```

use anyhow::Context;
use taskledger_api::{config::Config, telemetry::init_tracing};
use taskledger_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{close_pool, create_pool, PoolSettings},
    },
    seed::seed_demo_data,
    store::postgres::PgStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format, "taskledger_seed=info,taskledger_shared=info");

    ensure_database_exists(&config.database.url)
        .await
        .context("failed to create the database")?;

    let pool = create_pool(PoolSettings {
        url: config.database.url.clone(),
        max_connections: 2,
        ..Default::default()
    })
    .await
    .context("failed to connect to the database")?;

    run_migrations(&pool).await.context("failed to run migrations")?;

    let store = PgStore::new(pool.clone());
    let report = seed_demo_data(&store).await.context("seeding failed")?;

    if report.is_empty() {
        tracing::info!("Database already seeded, nothing to do");
    } else {
        tracing::info!(
            users = report.users,
            projects = report.projects,
            tasks = report.tasks,
            "Seeding complete"
        );
    }

    close_pool(pool).await;
    Ok(())
}
