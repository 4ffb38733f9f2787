/// Task time log model
///
/// Append-only record of hours a user spent on a task. Rows are never updated
/// or deleted, and deleting a task leaves its logs behind.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_logs (
///     log_id BIGSERIAL PRIMARY KEY,
///     task_id BIGINT NOT NULL,
///     user_id BIGINT NOT NULL,
///     hours_spent DOUBLE PRECISION NOT NULL CHECK (hours_spent > 0),
///     logged_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use super::{LogId, TaskId, UserId};

/// Time log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskLog {
    /// Unique log ID
    pub log_id: LogId,

    /// Task the time was spent on
    pub task_id: TaskId,

    /// User who logged the time
    pub user_id: UserId,

    /// Hours spent (always > 0)
    pub hours_spent: f64,

    /// When the entry was recorded
    pub logged_at: DateTime<Utc>,
}

/// Input for appending a log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskLog {
    pub task_id: TaskId,
    pub user_id: UserId,
    pub hours_spent: f64,
}

impl TaskLog {
    /// Appends a log entry
    pub async fn create(conn: &mut PgConnection, data: NewTaskLog) -> Result<Self, sqlx::Error> {
        let log = sqlx::query_as::<_, TaskLog>(
            r#"
            INSERT INTO task_logs (task_id, user_id, hours_spent)
            VALUES ($1, $2, $3)
            RETURNING log_id, task_id, user_id, hours_spent, logged_at
            "#,
        )
        .bind(data.task_id)
        .bind(data.user_id)
        .bind(data.hours_spent)
        .fetch_one(conn)
        .await?;

        Ok(log)
    }

    /// Lists the entries for a task, oldest first
    pub async fn list_by_task(conn: &mut PgConnection, task_id: TaskId) -> Result<Vec<Self>, sqlx::Error> {
        let logs = sqlx::query_as::<_, TaskLog>(
            r#"
            SELECT log_id, task_id, user_id, hours_spent, logged_at
            FROM task_logs
            WHERE task_id = $1
            ORDER BY log_id ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(conn)
        .await?;

        Ok(logs)
    }
}
