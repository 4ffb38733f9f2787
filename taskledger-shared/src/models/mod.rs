/// Database models for TaskLedger
///
/// This module contains all database models and their SQL operations.
///
/// # Models
///
/// - `user`: User accounts and roles (provisioned by seeding, read-only here)
/// - `project`: Projects managed by Managers
/// - `task`: Tasks belonging to projects, with a constrained status
/// - `task_log`: Append-only time log entries per task and user
///
/// Model functions take a `&mut PgConnection` so callers decide whether they
/// run on a pooled connection or inside a transaction. The `store` module
/// wraps them behind the `EntityStore` trait.
///
/// # Example
///
/// ```no_run
/// use taskledger_shared::models::project::{NewProject, Project};
/// use taskledger_shared::db::pool::{create_pool, PoolSettings};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(PoolSettings::default()).await?;
/// let mut tx = pool.begin().await?;
///
/// let id = Project::create(&mut tx, NewProject {
///     project_name: "Website Redesign".to_string(),
///     description: String::new(),
///     start_date: None,
///     end_date: None,
///     status: None,
/// }).await?;
///
/// tx.commit().await?;
/// println!("Created project {}", id);
/// # Ok(())
/// # }
/// ```

pub mod project;
pub mod task;
pub mod task_log;
pub mod user;

/// Store-generated user identifier
pub type UserId = i64;

/// Store-generated project identifier
pub type ProjectId = i64;

/// Store-generated task identifier
pub type TaskId = i64;

/// Store-generated time log identifier
pub type LogId = i64;
