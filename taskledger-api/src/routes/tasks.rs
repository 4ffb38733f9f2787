/// Task endpoints
///
/// Managers create, read, edit, assign and delete tasks. Team Members list
/// the tasks assigned to them, and the assignee of a task moves its status.
///
/// # Status values
///
/// `"Not Started"`, `"In Progress"`, `"Completed"`. Anything else is rejected
/// with 400 before the task is looked up.

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{CallerId, DeferredJson},
    routes::{admit_body, Gate, MessageResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use taskledger_shared::{
    models::{task::Task, user::Role, TaskId},
    services::tasks::{self, AssignTaskRequest, CreateTaskRequest, EditTaskRequest, UpdateStatusRequest},
};

pub async fn create_task(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    body: DeferredJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let req = admit_body(&state, Gate::Role(Role::Manager), &caller, body).await?;
    let id = tasks::create_task(&state.services, &caller, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id("Task created successfully", id)),
    ))
}

pub async fn get_task(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<Task>> {
    Ok(Json(tasks::get_task(&state.services, &caller, id).await?))
}

pub async fn assign_task(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<TaskId>,
    body: DeferredJson<AssignTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let req = admit_body(&state, Gate::Role(Role::Manager), &caller, body).await?;
    tasks::assign_task(&state.services, &caller, id, req).await?;
    Ok(Json(MessageResponse::new("Task assigned/reassigned successfully")))
}

pub async fn edit_task(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<TaskId>,
    body: DeferredJson<EditTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let req = admit_body(&state, Gate::Role(Role::Manager), &caller, body).await?;
    tasks::edit_task(&state.services, &caller, id, req).await?;
    Ok(Json(MessageResponse::new("Task updated successfully")))
}

pub async fn delete_task(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<MessageResponse>> {
    tasks::delete_task(&state.services, &caller, id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

pub async fn list_assigned_tasks(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(tasks::list_assigned_tasks(&state.services, &caller).await?))
}

pub async fn update_task_status(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<TaskId>,
    body: DeferredJson<UpdateStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let req = admit_body(&state, Gate::Identified, &caller, body).await?;
    tasks::update_task_status(&state.services, &caller, id, req).await?;
    Ok(Json(MessageResponse::new("Task status updated successfully")))
}
