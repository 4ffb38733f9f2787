/// Entity store abstraction
///
/// The lifecycle services never touch SQL directly; they talk to an
/// [`EntityStore`]. Two backends are provided:
///
/// - [`postgres::PgStore`]: production backend on a pooled `sqlx::PgPool`.
///   Every call acquires its own connection and returns it to the pool on all
///   exit paths; writes run in a transaction that is committed explicitly.
/// - [`memory::MemoryStore`]: in-process backend for tests and local runs.
///
/// # Contract
///
/// - Lookups return `Ok(None)` / empty lists for missing rows, never an error.
/// - `update_*` merge sparse changes (coalesce) and return `Ok(None)` when the
///   row does not exist.
/// - `delete_*` / `assign_task` return whether a row was affected.
/// - No cascades: deleting a project keeps its tasks, deleting a task keeps
///   its logs.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskledger_shared::store::{memory::MemoryStore, EntityStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
/// assert!(store.find_task(1).await?.is_none());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{
    project::{NewProject, Project, ProjectChanges},
    task::{NewTask, Task, TaskChanges},
    task_log::{NewTaskLog, TaskLog},
    user::{NewUser, User},
    ProjectId, TaskId, UserId,
};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database driver or connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Write collided with a unique key
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Relational persistence for users, projects, tasks and task logs
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Provisions a user (seeding only)
    async fn insert_user(&self, data: NewUser) -> StoreResult<UserId>;

    /// Counts provisioned users
    async fn count_users(&self) -> StoreResult<i64>;

    /// Finds a user by plaintext credentials
    async fn find_user(&self, username: &str, password: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    async fn insert_project(&self, data: NewProject) -> StoreResult<ProjectId>;

    async fn find_project(&self, id: ProjectId) -> StoreResult<Option<Project>>;

    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    async fn update_project(&self, id: ProjectId, changes: ProjectChanges) -> StoreResult<Option<Project>>;

    async fn delete_project(&self, id: ProjectId) -> StoreResult<bool>;

    async fn insert_task(&self, data: NewTask) -> StoreResult<TaskId>;

    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Finds a task only if it is assigned to `user_id`
    async fn find_task_assigned_to(&self, id: TaskId, user_id: UserId) -> StoreResult<Option<Task>>;

    async fn find_tasks_by_assignee(&self, user_id: UserId) -> StoreResult<Vec<Task>>;

    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Option<Task>>;

    async fn assign_task(&self, id: TaskId, user_id: UserId) -> StoreResult<bool>;

    async fn delete_task(&self, id: TaskId) -> StoreResult<bool>;

    async fn insert_task_log(&self, data: NewTaskLog) -> StoreResult<TaskLog>;

    async fn list_task_logs(&self, task_id: TaskId) -> StoreResult<Vec<TaskLog>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Conflict("username already exists: manager1".to_string());
        assert_eq!(err.to_string(), "Conflict: username already exists: manager1");

        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(err.to_string().starts_with("Database error"));
    }
}
