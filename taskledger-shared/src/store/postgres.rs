/// PostgreSQL entity store
///
/// Each operation acquires one pooled connection for its own duration. Reads
/// use `pool.acquire()`; writes use `pool.begin()` and commit explicitly, so
/// an early return drops the transaction (rollback) and the connection goes
/// back to the pool either way.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{EntityStore, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    project::{NewProject, Project, ProjectChanges},
    task::{NewTask, Task, TaskChanges},
    task_log::{NewTaskLog, TaskLog},
    user::{NewUser, User},
    ProjectId, TaskId, UserId,
};

/// Entity store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, data: NewUser) -> StoreResult<UserId> {
        let username = data.username.clone();
        let mut tx = self.pool.begin().await?;
        let id = User::create(&mut tx, data).await.map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Conflict(format!("username already exists: {}", username))
            }
            other => StoreError::Database(other),
        })?;
        tx.commit().await?;

        debug!(user_id = id, "Inserted user");
        Ok(id)
    }

    async fn count_users(&self) -> StoreResult<i64> {
        let mut conn = self.pool.acquire().await?;
        Ok(User::count(&mut conn).await?)
    }

    async fn find_user(&self, username: &str, password: &str) -> StoreResult<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        Ok(User::find_by_credentials(&mut conn, username, password).await?)
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        Ok(User::find_by_id(&mut conn, id).await?)
    }

    async fn insert_project(&self, data: NewProject) -> StoreResult<ProjectId> {
        let mut tx = self.pool.begin().await?;
        let id = Project::create(&mut tx, data).await?;
        tx.commit().await?;

        debug!(project_id = id, "Inserted project");
        Ok(id)
    }

    async fn find_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        let mut conn = self.pool.acquire().await?;
        Ok(Project::find_by_id(&mut conn, id).await?)
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let mut conn = self.pool.acquire().await?;
        Ok(Project::list(&mut conn).await?)
    }

    async fn update_project(&self, id: ProjectId, changes: ProjectChanges) -> StoreResult<Option<Project>> {
        let mut tx = self.pool.begin().await?;
        let project = Project::update(&mut tx, id, changes).await?;
        tx.commit().await?;

        debug!(project_id = id, found = project.is_some(), "Updated project");
        Ok(project)
    }

    async fn delete_project(&self, id: ProjectId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = Project::delete(&mut tx, id).await?;
        tx.commit().await?;

        debug!(project_id = id, deleted, "Deleted project");
        Ok(deleted)
    }

    async fn insert_task(&self, data: NewTask) -> StoreResult<TaskId> {
        let mut tx = self.pool.begin().await?;
        let id = Task::create(&mut tx, data).await?;
        tx.commit().await?;

        debug!(task_id = id, "Inserted task");
        Ok(id)
    }

    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let mut conn = self.pool.acquire().await?;
        Ok(Task::find_by_id(&mut conn, id).await?)
    }

    async fn find_task_assigned_to(&self, id: TaskId, user_id: UserId) -> StoreResult<Option<Task>> {
        let mut conn = self.pool.acquire().await?;
        Ok(Task::find_by_id_and_assignee(&mut conn, id, user_id).await?)
    }

    async fn find_tasks_by_assignee(&self, user_id: UserId) -> StoreResult<Vec<Task>> {
        let mut conn = self.pool.acquire().await?;
        Ok(Task::list_by_assignee(&mut conn, user_id).await?)
    }

    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let mut tx = self.pool.begin().await?;
        let task = Task::update(&mut tx, id, changes).await?;
        tx.commit().await?;

        debug!(task_id = id, found = task.is_some(), "Updated task");
        Ok(task)
    }

    async fn assign_task(&self, id: TaskId, user_id: UserId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let assigned = Task::assign(&mut tx, id, user_id).await?;
        tx.commit().await?;

        debug!(task_id = id, user_id, assigned, "Assigned task");
        Ok(assigned)
    }

    async fn delete_task(&self, id: TaskId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = Task::delete(&mut tx, id).await?;
        tx.commit().await?;

        debug!(task_id = id, deleted, "Deleted task");
        Ok(deleted)
    }

    async fn insert_task_log(&self, data: NewTaskLog) -> StoreResult<TaskLog> {
        let mut tx = self.pool.begin().await?;
        let log = TaskLog::create(&mut tx, data).await?;
        tx.commit().await?;

        debug!(log_id = log.log_id, task_id = log.task_id, "Inserted task log");
        Ok(log)
    }

    async fn list_task_logs(&self, task_id: TaskId) -> StoreResult<Vec<TaskLog>> {
        let mut conn = self.pool.acquire().await?;
        Ok(TaskLog::list_by_task(&mut conn, task_id).await?)
    }
}
