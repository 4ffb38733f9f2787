/// Project lifecycle (Manager only)
///
/// Every operation requires the caller to resolve to exactly `Role::Manager`.
/// Any Manager may act on any project.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use super::{require_field, validate_request, ServiceContext};
use crate::auth::identity::Caller;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    project::{NewProject, Project, ProjectChanges},
    user::Role,
    ProjectId,
};

/// Create project request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Required
    #[validate(length(min = 1, max = 255, message = "project_name must be 1-255 characters"))]
    pub project_name: Option<String>,

    /// Defaults to an empty string
    pub description: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 64, message = "status must be at most 64 characters"))]
    pub status: Option<String>,
}

/// Update project request
///
/// Omitted (or `null`) fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "project_name must be 1-255 characters"))]
    pub project_name: Option<String>,

    pub description: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 64, message = "status must be at most 64 characters"))]
    pub status: Option<String>,
}

impl From<UpdateProjectRequest> for ProjectChanges {
    fn from(req: UpdateProjectRequest) -> Self {
        ProjectChanges {
            project_name: req.project_name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status,
        }
    }
}

/// Creates a project and returns its ID
pub async fn create_project(
    ctx: &ServiceContext,
    caller: &Caller,
    req: CreateProjectRequest,
) -> ServiceResult<ProjectId> {
    let identity = ctx.authorize(Role::Manager, caller).await?;
    validate_request(&req)?;

    let project_name = require_field(req.project_name, "project_name")?;

    let project_id = ctx
        .store
        .insert_project(NewProject {
            project_name,
            description: req.description.unwrap_or_default(),
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status,
        })
        .await?;

    info!(project_id, user_id = identity.user_id, "Project created");
    Ok(project_id)
}

/// Reads a project by ID
pub async fn get_project(ctx: &ServiceContext, caller: &Caller, id: ProjectId) -> ServiceResult<Project> {
    ctx.authorize(Role::Manager, caller).await?;

    ctx.store
        .find_project(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))
}

/// Lists every project
pub async fn list_projects(ctx: &ServiceContext, caller: &Caller) -> ServiceResult<Vec<Project>> {
    ctx.authorize(Role::Manager, caller).await?;
    Ok(ctx.store.list_projects().await?)
}

/// Merges the supplied fields into a project
///
/// Returns the project as stored after the merge.
pub async fn update_project(
    ctx: &ServiceContext,
    caller: &Caller,
    id: ProjectId,
    req: UpdateProjectRequest,
) -> ServiceResult<Project> {
    let identity = ctx.authorize(Role::Manager, caller).await?;
    validate_request(&req)?;

    if ctx.store.find_project(id).await?.is_none() {
        return Err(ServiceError::not_found("Project"));
    }

    // The row can disappear between the read and the write
    let project = ctx
        .store
        .update_project(id, req.into())
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;

    info!(project_id = id, user_id = identity.user_id, "Project updated");
    Ok(project)
}

/// Deletes a project
///
/// Tasks that reference the project are kept.
pub async fn delete_project(ctx: &ServiceContext, caller: &Caller, id: ProjectId) -> ServiceResult<()> {
    let identity = ctx.authorize(Role::Manager, caller).await?;

    if ctx.store.find_project(id).await?.is_none() {
        return Err(ServiceError::not_found("Project"));
    }

    if !ctx.store.delete_project(id).await? {
        return Err(ServiceError::not_found("Project"));
    }

    info!(project_id = id, user_id = identity.user_id, "Project deleted");
    Ok(())
}
