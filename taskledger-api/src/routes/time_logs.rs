/// Time log endpoints
///
/// ```text
/// POST /tasks/:id/log-time   { "hours_spent": 2.5 }   # assignee (Team Member)
/// GET  /tasks/:id/logs                                # Manager
/// ```
///
/// `hours_spent` must be a JSON number greater than zero; strings such as
/// `"2.5"` are rejected with 400.

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
    models::{task_log::TaskLog, user::Role, TaskId},
    services::time_logs::{self, LogTimeRequest},
};

pub async fn log_time(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<TaskId>,
    body: DeferredJson<LogTimeRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let req = admit_body(&state, Gate::Role(Role::TeamMember), &caller, body).await?;
    let log = time_logs::log_time(&state.services, &caller, id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id("Time logged successfully", log.log_id)),
    ))
}

pub async fn list_task_logs(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<Vec<TaskLog>>> {
    Ok(Json(time_logs::list_task_logs(&state.services, &caller, id).await?))
}
