/// Project endpoints (Manager only)
///
/// - `POST   /projects`: create, 201 with the new ID
/// - `GET    /projects`: list
/// - `GET    /projects/:id`: read
/// - `PUT    /projects/:id`: sparse update
/// - `DELETE /projects/:id`: delete (tasks are kept)

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
    models::{project::Project, user::Role, ProjectId},
    services::projects::{self, CreateProjectRequest, UpdateProjectRequest},
};

pub async fn create_project(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    body: DeferredJson<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let req = admit_body(&state, Gate::Role(Role::Manager), &caller, body).await?;
    let id = projects::create_project(&state.services, &caller, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id("Project created successfully", id)),
    ))
}

pub async fn list_projects(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(projects::list_projects(&state.services, &caller).await?))
}

pub async fn get_project(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<ProjectId>,
) -> ApiResult<Json<Project>> {
    Ok(Json(projects::get_project(&state.services, &caller, id).await?))
}

pub async fn update_project(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<ProjectId>,
    body: DeferredJson<UpdateProjectRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let req = admit_body(&state, Gate::Role(Role::Manager), &caller, body).await?;
    projects::update_project(&state.services, &caller, id, req).await?;
    Ok(Json(MessageResponse::new("Project updated successfully")))
}

pub async fn delete_project(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    Path(id): Path<ProjectId>,
) -> ApiResult<Json<MessageResponse>> {
    projects::delete_project(&state.services, &caller, id).await?;
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
