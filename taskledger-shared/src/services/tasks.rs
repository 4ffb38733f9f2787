/// Task lifecycle
///
/// | Operation | Who |
/// |---|---|
/// | create / read / assign / edit / delete | Manager |
/// | list assigned tasks | Team Member |
/// | update status | the task's assignee |
///
/// Status values are validated before any store access. Task creation checks
/// that the project exists, and assignment checks that the assignee exists;
/// deletes never cascade.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use super::{parse_status, require_field, validate_request, ServiceContext};
use crate::auth::{
    authorization::require_assignee,
    identity::{Caller, Identity},
};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    task::{NewTask, Task, TaskChanges, TaskStatus},
    user::Role,
    ProjectId, TaskId, UserId,
};

/// Create task request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Required
    pub project_id: Option<ProjectId>,

    /// Required
    #[validate(length(min = 1, max = 255, message = "task_name must be 1-255 characters"))]
    pub task_name: Option<String>,

    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,

    /// Defaults to "Not Started"
    pub status: Option<String>,

    #[validate(range(min = 1, message = "assigned_user_id must be a positive ID"))]
    pub assigned_user_id: Option<UserId>,
}

/// Assign task request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignTaskRequest {
    pub assigned_user_id: Option<UserId>,
}

/// Edit task request
///
/// Omitted (or `null`) fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EditTaskRequest {
    #[validate(length(min = 1, max = 255, message = "task_name must be 1-255 characters"))]
    pub task_name: Option<String>,

    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,

    pub status: Option<String>,

    #[validate(range(min = 1, message = "assigned_user_id must be a positive ID"))]
    pub assigned_user_id: Option<UserId>,
}

/// Update status request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

async fn ensure_user_exists(ctx: &ServiceContext, user_id: UserId) -> ServiceResult<()> {
    if ctx.store.find_user_by_id(user_id).await?.is_none() {
        return Err(ServiceError::not_found("Assigned user"));
    }
    Ok(())
}

async fn ensure_task_exists(ctx: &ServiceContext, id: TaskId) -> ServiceResult<Task> {
    ctx.store
        .find_task(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))
}

/// Loads a task the caller is assigned to
///
/// Runs the assignee-scoped lookup first; on a miss, a plain lookup tells a
/// missing task (`NotFound`) apart from someone else's task (`Forbidden`).
pub(crate) async fn find_assigned_task(
    ctx: &ServiceContext,
    identity: &Identity,
    id: TaskId,
) -> ServiceResult<Task> {
    if let Some(task) = ctx.store.find_task_assigned_to(id, identity.user_id).await? {
        return Ok(task);
    }

    let task = ensure_task_exists(ctx, id).await?;
    require_assignee(identity, &task)?;

    // Reassigned to the caller between the two reads
    Ok(task)
}

/// Creates a task and returns its ID
pub async fn create_task(ctx: &ServiceContext, caller: &Caller, req: CreateTaskRequest) -> ServiceResult<TaskId> {
    let identity = ctx.authorize(Role::Manager, caller).await?;
    validate_request(&req)?;

    let project_id = require_field(req.project_id, "project_id")?;
    let task_name = require_field(req.task_name, "task_name")?;
    let status = match req.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => TaskStatus::default(),
    };

    if ctx.store.find_project(project_id).await?.is_none() {
        return Err(ServiceError::not_found("Project"));
    }
    if let Some(user_id) = req.assigned_user_id {
        ensure_user_exists(ctx, user_id).await?;
    }

    let task_id = ctx
        .store
        .insert_task(NewTask {
            project_id,
            task_name,
            description: req.description.unwrap_or_default(),
            due_date: req.due_date,
            status,
            assigned_user_id: req.assigned_user_id,
        })
        .await?;

    info!(task_id, project_id, status = %status, user_id = identity.user_id, "Task created");
    Ok(task_id)
}

/// Reads a task by ID
pub async fn get_task(ctx: &ServiceContext, caller: &Caller, id: TaskId) -> ServiceResult<Task> {
    ctx.authorize(Role::Manager, caller).await?;
    ensure_task_exists(ctx, id).await
}

/// Assigns (or reassigns) a task
pub async fn assign_task(
    ctx: &ServiceContext,
    caller: &Caller,
    id: TaskId,
    req: AssignTaskRequest,
) -> ServiceResult<()> {
    let identity = ctx.authorize(Role::Manager, caller).await?;

    let assignee = req
        .assigned_user_id
        .filter(|user_id| *user_id > 0)
        .ok_or_else(|| ServiceError::invalid_input("assigned_user_id must be provided"))?;

    ensure_task_exists(ctx, id).await?;
    ensure_user_exists(ctx, assignee).await?;

    if !ctx.store.assign_task(id, assignee).await? {
        return Err(ServiceError::not_found("Task"));
    }

    info!(task_id = id, assignee, user_id = identity.user_id, "Task assigned");
    Ok(())
}

/// Merges the supplied fields into a task
pub async fn edit_task(
    ctx: &ServiceContext,
    caller: &Caller,
    id: TaskId,
    req: EditTaskRequest,
) -> ServiceResult<Task> {
    let identity = ctx.authorize(Role::Manager, caller).await?;
    validate_request(&req)?;

    let status = req.status.as_deref().map(parse_status).transpose()?;

    ensure_task_exists(ctx, id).await?;
    if let Some(user_id) = req.assigned_user_id {
        ensure_user_exists(ctx, user_id).await?;
    }

    let changes = TaskChanges {
        task_name: req.task_name,
        description: req.description,
        due_date: req.due_date,
        status,
        assigned_user_id: req.assigned_user_id,
    };

    let task = ctx
        .store
        .update_task(id, changes)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))?;

    info!(task_id = id, user_id = identity.user_id, "Task updated");
    Ok(task)
}

/// Deletes a task
///
/// Time logs that reference the task are kept.
pub async fn delete_task(ctx: &ServiceContext, caller: &Caller, id: TaskId) -> ServiceResult<()> {
    let identity = ctx.authorize(Role::Manager, caller).await?;

    ensure_task_exists(ctx, id).await?;
    if !ctx.store.delete_task(id).await? {
        return Err(ServiceError::not_found("Task"));
    }

    info!(task_id = id, user_id = identity.user_id, "Task deleted");
    Ok(())
}

/// Lists the tasks assigned to the calling Team Member
pub async fn list_assigned_tasks(ctx: &ServiceContext, caller: &Caller) -> ServiceResult<Vec<Task>> {
    let identity = ctx.authorize(Role::TeamMember, caller).await?;
    Ok(ctx.store.find_tasks_by_assignee(identity.user_id).await?)
}

/// Sets the status of a task assigned to the caller
///
/// There is no role requirement beyond being the assignee.
pub async fn update_task_status(
    ctx: &ServiceContext,
    caller: &Caller,
    id: TaskId,
    req: UpdateStatusRequest,
) -> ServiceResult<Task> {
    let identity = ctx.identify(caller).await?;

    let status = parse_status(&require_field(req.status, "status")?)?;

    find_assigned_task(ctx, &identity, id).await?;

    let task = ctx
        .store
        .update_task(
            id,
            TaskChanges {
                status: Some(status),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))?;

    info!(task_id = id, status = %status, user_id = identity.user_id, "Task status updated");
    Ok(task)
}
