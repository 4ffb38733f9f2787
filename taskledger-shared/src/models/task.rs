/// Task model and database operations
///
/// Tasks belong to a project and may be assigned to a single user. Managers
/// create, assign, edit and delete tasks; the assignee moves the status.
///
/// # Status
///
/// ```text
/// Not Started → In Progress → Completed
/// ```
///
/// Ordering is not enforced: any status may be set from any other. The only
/// rule is membership in the three-value set, which the Postgres enum type
/// enforces as well.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('Not Started', 'In Progress', 'Completed');
///
/// CREATE TABLE tasks (
///     task_id BIGSERIAL PRIMARY KEY,
///     project_id BIGINT NOT NULL,
///     task_name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     due_date DATE,
///     status task_status NOT NULL DEFAULT 'Not Started',
///     assigned_user_id BIGINT
/// );
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use std::fmt;
use std::str::FromStr;

use super::{ProjectId, TaskId, UserId};

/// Task status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Work has not begun (default for new tasks)
    #[default]
    #[sqlx(rename = "Not Started")]
    #[serde(rename = "Not Started")]
    NotStarted,

    /// Work is underway
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,

    /// Work is done
    #[sqlx(rename = "Completed")]
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// Every accepted status, in lifecycle order
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Returns the stored/display form of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Comma-separated list of accepted values, for error messages
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Task record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub task_id: TaskId,

    /// Owning project (not enforced as a foreign key)
    pub project_id: ProjectId,

    /// Human-readable task name
    pub task_name: String,

    /// Free-form description (empty when not provided)
    pub description: String,

    /// Due date
    pub due_date: Option<NaiveDate>,

    /// Current status
    pub status: TaskStatus,

    /// Assignee, if any
    pub assigned_user_id: Option<UserId>,
}

impl Task {
    /// Whether `user_id` is the recorded assignee
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assigned_user_id == Some(user_id)
    }
}

/// Input for inserting a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub project_id: ProjectId,
    pub task_name: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub assigned_user_id: Option<UserId>,
}

/// Sparse set of task changes
///
/// `None` fields keep their stored value (coalesce merge).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskChanges {
    pub task_name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub assigned_user_id: Option<UserId>,
}

impl TaskChanges {
    /// Applies the changes to an in-memory task
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(name) = &self.task_name {
            task.task_name = name.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(user_id) = self.assigned_user_id {
            task.assigned_user_id = Some(user_id);
        }
    }
}

const TASK_COLUMNS: &str =
    "task_id, project_id, task_name, description, due_date, status, assigned_user_id";

impl Task {
    /// Inserts a task and returns its generated ID
    pub async fn create(conn: &mut PgConnection, data: NewTask) -> Result<TaskId, sqlx::Error> {
        let (task_id,): (TaskId,) = sqlx::query_as(
            r#"
            INSERT INTO tasks (project_id, task_name, description, due_date, status, assigned_user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING task_id
            "#,
        )
        .bind(data.project_id)
        .bind(data.task_name)
        .bind(data.description)
        .bind(data.due_date)
        .bind(data.status)
        .bind(data.assigned_user_id)
        .fetch_one(conn)
        .await?;

        Ok(task_id)
    }

    /// Finds a task by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: TaskId) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM tasks WHERE task_id = $1", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(task)
    }

    /// Finds a task by ID, scoped to its assignee
    ///
    /// Returns `None` both when the task is missing and when it is assigned
    /// to someone else.
    pub async fn find_by_id_and_assignee(
        conn: &mut PgConnection,
        id: TaskId,
        user_id: UserId,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM tasks WHERE task_id = $1 AND assigned_user_id = $2",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(conn)
            .await?;

        Ok(task)
    }

    /// Lists every task assigned to a user, ordered by ID
    pub async fn list_by_assignee(conn: &mut PgConnection, user_id: UserId) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM tasks WHERE assigned_user_id = $1 ORDER BY task_id ASC",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(conn)
            .await?;

        Ok(tasks)
    }

    /// Merges changes into a task
    ///
    /// Omitted fields keep their stored value. Returns `None` if the task does
    /// not exist.
    pub async fn update(
        conn: &mut PgConnection,
        id: TaskId,
        changes: TaskChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE tasks
            SET task_name = COALESCE($2, task_name),
                description = COALESCE($3, description),
                due_date = COALESCE($4, due_date),
                status = COALESCE($5, status),
                assigned_user_id = COALESCE($6, assigned_user_id)
            WHERE task_id = $1
            RETURNING {}
            "#,
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(changes.task_name)
            .bind(changes.description)
            .bind(changes.due_date)
            .bind(changes.status)
            .bind(changes.assigned_user_id)
            .fetch_optional(conn)
            .await?;

        Ok(task)
    }

    /// Sets the assignee unconditionally
    pub async fn assign(conn: &mut PgConnection, id: TaskId, user_id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET assigned_user_id = $2 WHERE task_id = $1")
            .bind(id)
            .bind(user_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task
    ///
    /// Time logs referencing the task are left in place.
    pub async fn delete(conn: &mut PgConnection, id: TaskId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::NotStarted.as_str(), "Not Started");
        assert_eq!(TaskStatus::InProgress.as_str(), "In Progress");
        assert_eq!(TaskStatus::Completed.as_str(), "Completed");
    }

    #[test]
    fn test_task_status_parse() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }

        assert_eq!("Archived".parse::<TaskStatus>().unwrap_err(), "Archived");
        assert!("not started".parse::<TaskStatus>().is_err());
        assert!("".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_default_status() {
        assert_eq!(TaskStatus::default(), TaskStatus::NotStarted);
    }

    #[test]
    fn test_allowed_values() {
        assert_eq!(
            TaskStatus::allowed_values(),
            "Not Started, In Progress, Completed"
        );
    }

    #[test]
    fn test_is_assigned_to() {
        let mut task = Task {
            task_id: 1,
            project_id: 1,
            task_name: "Create Wireframes".to_string(),
            description: String::new(),
            due_date: None,
            status: TaskStatus::NotStarted,
            assigned_user_id: Some(3),
        };

        assert!(task.is_assigned_to(3));
        assert!(!task.is_assigned_to(4));

        task.assigned_user_id = None;
        assert!(!task.is_assigned_to(3));
    }

    #[test]
    fn test_changes_keep_omitted_fields() {
        let original = Task {
            task_id: 7,
            project_id: 2,
            task_name: "Social Media Ads".to_string(),
            description: "Run ads".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 12, 5),
            status: TaskStatus::NotStarted,
            assigned_user_id: None,
        };

        let mut task = original.clone();
        TaskChanges {
            status: Some(TaskStatus::InProgress),
            ..Default::default()
        }
        .apply_to(&mut task);

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.task_name, original.task_name);
        assert_eq!(task.description, original.description);
        assert_eq!(task.due_date, original.due_date);
        assert_eq!(task.assigned_user_id, None);
    }
}
