/// Project model and database operations
///
/// Projects are created, merged and deleted by Managers. There is no owner
/// column: any Manager may act on any project.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     project_id BIGSERIAL PRIMARY KEY,
///     project_name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     start_date DATE,
///     end_date DATE,
///     status VARCHAR(64)
/// );
/// ```
///
/// Deleting a project does not delete its tasks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use super::ProjectId;

/// Project record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub project_id: ProjectId,

    /// Human-readable project name
    pub project_name: String,

    /// Free-form description (empty when not provided)
    pub description: String,

    /// Planned start date
    pub start_date: Option<NaiveDate>,

    /// Planned end date
    pub end_date: Option<NaiveDate>,

    /// Free-form project status (e.g. "In Progress")
    pub status: Option<String>,
}

/// Input for inserting a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub project_name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Sparse set of project changes
///
/// `None` fields keep their stored value (coalesce merge).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectChanges {
    pub project_name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl ProjectChanges {
    /// Applies the changes to an in-memory project
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = &self.project_name {
            project.project_name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(start_date) = self.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(end_date) = self.end_date {
            project.end_date = Some(end_date);
        }
        if let Some(status) = &self.status {
            project.status = Some(status.clone());
        }
    }
}

impl Project {
    /// Inserts a project and returns its generated ID
    pub async fn create(conn: &mut PgConnection, data: NewProject) -> Result<ProjectId, sqlx::Error> {
        let (project_id,): (ProjectId,) = sqlx::query_as(
            r#"
            INSERT INTO projects (project_name, description, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING project_id
            "#,
        )
        .bind(data.project_name)
        .bind(data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.status)
        .fetch_one(conn)
        .await?;

        Ok(project_id)
    }

    /// Finds a project by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: ProjectId) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT project_id, project_name, description, start_date, end_date, status
            FROM projects
            WHERE project_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(project)
    }

    /// Lists all projects ordered by ID
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT project_id, project_name, description, start_date, end_date, status
            FROM projects
            ORDER BY project_id ASC
            "#,
        )
        .fetch_all(conn)
        .await?;

        Ok(projects)
    }

    /// Merges changes into a project
    ///
    /// Omitted fields keep their stored value. Returns `None` if the project
    /// does not exist.
    pub async fn update(
        conn: &mut PgConnection,
        id: ProjectId,
        changes: ProjectChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET project_name = COALESCE($2, project_name),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                status = COALESCE($6, status)
            WHERE project_id = $1
            RETURNING project_id, project_name, description, start_date, end_date, status
            "#,
        )
        .bind(id)
        .bind(changes.project_name)
        .bind(changes.description)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.status)
        .fetch_optional(conn)
        .await?;

        Ok(project)
    }

    /// Deletes a project
    ///
    /// Tasks referencing the project are left in place.
    pub async fn delete(conn: &mut PgConnection, id: ProjectId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE project_id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project {
            project_id: 1,
            project_name: "Website Redesign".to_string(),
            description: "Modern look".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 10, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 31),
            status: Some("In Progress".to_string()),
        }
    }

    #[test]
    fn test_empty_changes_keep_everything() {
        let mut project = sample();
        ProjectChanges::default().apply_to(&mut project);
        assert_eq!(project, sample());
    }

    #[test]
    fn test_changes_replace_only_present_fields() {
        let mut project = sample();
        ProjectChanges {
            project_name: Some("Website v2".to_string()),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            ..Default::default()
        }
        .apply_to(&mut project);

        assert_eq!(project.project_name, "Website v2");
        assert_eq!(project.end_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(project.description, "Modern look");
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2024, 10, 1));
        assert_eq!(project.status.as_deref(), Some("In Progress"));
    }
}
