/// Postgres plumbing
///
/// - `pool`: connection pool construction and health probe
/// - `migrations`: embedded schema migrations
///
/// Entity queries live on the model types in [`crate::models`] and are
/// reached through [`crate::store::postgres::PgStore`].
///
/// # Example
///
/// ```no_run
/// use taskledger_shared::db::{migrations::run_migrations, pool::{create_pool, PoolSettings}};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(PoolSettings {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
