/// Time logging
///
/// Logs are append-only. A Team Member can log hours against a task assigned
/// to them; Managers can read a task's log history.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{tasks::find_assigned_task, ServiceContext};
use crate::auth::identity::Caller;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    task_log::{NewTaskLog, TaskLog},
    user::Role,
    TaskId,
};

const INVALID_HOURS: &str = "hours_spent must be a positive number";

/// Log time request
///
/// `hours_spent` is kept as raw JSON so that strings and other non-numbers
/// are reported as invalid input instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogTimeRequest {
    pub hours_spent: Option<Value>,
}

impl LogTimeRequest {
    pub fn hours(hours: f64) -> Self {
        Self {
            hours_spent: Some(Value::from(hours)),
        }
    }
}

/// Accepts a finite JSON number greater than zero
fn parse_hours(value: Option<&Value>) -> ServiceResult<f64> {
    match value.and_then(Value::as_f64) {
        Some(hours) if hours.is_finite() && hours > 0.0 => Ok(hours),
        _ => Err(ServiceError::invalid_input(INVALID_HOURS)),
    }
}

/// Appends a time log entry for a task assigned to the caller
pub async fn log_time(
    ctx: &ServiceContext,
    caller: &Caller,
    task_id: TaskId,
    req: LogTimeRequest,
) -> ServiceResult<TaskLog> {
    let identity = ctx.authorize(Role::TeamMember, caller).await?;
    let hours_spent = parse_hours(req.hours_spent.as_ref())?;

    find_assigned_task(ctx, &identity, task_id).await?;

    let log = ctx
        .store
        .insert_task_log(NewTaskLog {
            task_id,
            user_id: identity.user_id,
            hours_spent,
        })
        .await?;

    info!(
        log_id = log.log_id,
        task_id,
        hours_spent,
        user_id = identity.user_id,
        "Time logged"
    );
    Ok(log)
}

/// Lists the log entries recorded against a task
pub async fn list_task_logs(ctx: &ServiceContext, caller: &Caller, task_id: TaskId) -> ServiceResult<Vec<TaskLog>> {
    ctx.authorize(Role::Manager, caller).await?;

    if ctx.store.find_task(task_id).await?.is_none() {
        return Err(ServiceError::not_found("Task"));
    }

    Ok(ctx.store.list_task_logs(task_id).await?)
}
