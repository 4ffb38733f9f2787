/// In-memory entity store
///
/// Keeps every table in `BTreeMap`s behind a single `tokio::sync::RwLock`.
/// IDs are generated from per-table counters starting at 1, like `BIGSERIAL`.
/// The merge and no-cascade semantics match [`super::postgres::PgStore`].
///
/// Intended for tests and local runs without a database.
///
/// # Example
///
/// ```
/// use taskledger_shared::models::user::{NewUser, Role};
/// use taskledger_shared::store::{memory::MemoryStore, EntityStore};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let id = store.insert_user(NewUser {
///     username: "manager1".to_string(),
///     password: "password123".to_string(),
///     name: "Alice Johnson".to_string(),
///     role: Role::Manager,
///     email: "alice.johnson@example.com".to_string(),
/// }).await?;
///
/// assert_eq!(store.find_user_by_id(id).await?.unwrap().role, Role::Manager);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{EntityStore, StoreError, StoreResult};
use crate::models::{
    project::{NewProject, Project, ProjectChanges},
    task::{NewTask, Task, TaskChanges},
    task_log::{NewTaskLog, TaskLog},
    user::{NewUser, User},
    LogId, ProjectId, TaskId, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
    task_logs: BTreeMap<LogId, TaskLog>,
    next_user_id: UserId,
    next_project_id: ProjectId,
    next_task_id: TaskId,
    next_log_id: LogId,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Entity store held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects
    pub async fn project_count(&self) -> usize {
        self.tables.read().await.projects.len()
    }

    /// Number of stored tasks
    pub async fn task_count(&self) -> usize {
        self.tables.read().await.tasks.len()
    }

    /// Number of stored time log entries
    pub async fn task_log_count(&self) -> usize {
        self.tables.read().await.task_logs.len()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_user(&self, data: NewUser) -> StoreResult<UserId> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == data.username) {
            return Err(StoreError::Conflict(format!("username already exists: {}", data.username)));
        }

        let user_id = next_id(&mut tables.next_user_id);
        tables.users.insert(
            user_id,
            User {
                user_id,
                username: data.username,
                password: data.password,
                name: data.name,
                role: data.role,
                email: data.email,
            },
        );

        Ok(user_id)
    }

    async fn count_users(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.users.len() as i64)
    }

    async fn find_user(&self, username: &str, password: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username && u.password == password)
            .cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert_project(&self, data: NewProject) -> StoreResult<ProjectId> {
        let mut tables = self.tables.write().await;
        let project_id = next_id(&mut tables.next_project_id);
        tables.projects.insert(
            project_id,
            Project {
                project_id,
                project_name: data.project_name,
                description: data.description,
                start_date: data.start_date,
                end_date: data.end_date,
                status: data.status,
            },
        );

        Ok(project_id)
    }

    async fn find_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.tables.read().await.projects.values().cloned().collect())
    }

    async fn update_project(&self, id: ProjectId, changes: ProjectChanges) -> StoreResult<Option<Project>> {
        let mut tables = self.tables.write().await;
        Ok(tables.projects.get_mut(&id).map(|project| {
            changes.apply_to(project);
            project.clone()
        }))
    }

    async fn delete_project(&self, id: ProjectId) -> StoreResult<bool> {
        Ok(self.tables.write().await.projects.remove(&id).is_some())
    }

    async fn insert_task(&self, data: NewTask) -> StoreResult<TaskId> {
        let mut tables = self.tables.write().await;
        let task_id = next_id(&mut tables.next_task_id);
        tables.tasks.insert(
            task_id,
            Task {
                task_id,
                project_id: data.project_id,
                task_name: data.task_name,
                description: data.description,
                due_date: data.due_date,
                status: data.status,
                assigned_user_id: data.assigned_user_id,
            },
        );

        Ok(task_id)
    }

    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn find_task_assigned_to(&self, id: TaskId, user_id: UserId) -> StoreResult<Option<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .get(&id)
            .filter(|task| task.is_assigned_to(user_id))
            .cloned())
    }

    async fn find_tasks_by_assignee(&self, user_id: UserId) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter(|task| task.is_assigned_to(user_id))
            .cloned()
            .collect())
    }

    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;
        Ok(tables.tasks.get_mut(&id).map(|task| {
            changes.apply_to(task);
            task.clone()
        }))
    }

    async fn assign_task(&self, id: TaskId, user_id: UserId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.tasks.get_mut(&id) {
            Some(task) => {
                task.assigned_user_id = Some(user_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_task(&self, id: TaskId) -> StoreResult<bool> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }

    async fn insert_task_log(&self, data: NewTaskLog) -> StoreResult<TaskLog> {
        let mut tables = self.tables.write().await;
        let log_id = next_id(&mut tables.next_log_id);
        let log = TaskLog {
            log_id,
            task_id: data.task_id,
            user_id: data.user_id,
            hours_spent: data.hours_spent,
            logged_at: Utc::now(),
        };
        tables.task_logs.insert(log_id, log.clone());

        Ok(log)
    }

    async fn list_task_logs(&self, task_id: TaskId) -> StoreResult<Vec<TaskLog>> {
        let tables = self.tables.read().await;
        Ok(tables
            .task_logs
            .values()
            .filter(|log| log.task_id == task_id)
            .cloned()
            .collect())
    }
}
