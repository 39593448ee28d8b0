//! Project repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::translate;
use crate::error::AppError;
use crate::models::{NewProject, Project};

const CREATE_PROJECT_QUERY: &str = "INSERT INTO projects (project_id, owner_id, title, description, goal_amount, deadline) \
     VALUES ($1, $2, $3, $4, $5, $6) \
     RETURNING project_id, owner_id, title, description, goal_amount, deadline, created_at, updated_at, is_deleted";

const GET_PROJECT_BY_ID_QUERY: &str = "SELECT project_id, owner_id, title, description, goal_amount, deadline, created_at, updated_at, is_deleted \
     FROM projects WHERE project_id = $1 AND is_deleted = FALSE";

const GET_PROJECTS_BY_OWNER_ID_QUERY: &str = "SELECT project_id, owner_id, title, description, goal_amount, deadline, created_at, updated_at, is_deleted \
     FROM projects WHERE owner_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC";

const GET_ALL_PROJECTS_QUERY: &str = "SELECT project_id, owner_id, title, description, goal_amount, deadline, created_at, updated_at, is_deleted \
     FROM projects WHERE is_deleted = FALSE ORDER BY created_at DESC";

/// Contains logic for all project operations.
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new project with a fresh id. The owner must exist; a
    /// dangling owner surfaces as `ForeignKey("user")`.
    pub async fn create_project(&self, new_project: &NewProject) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(CREATE_PROJECT_QUERY)
            .bind(Uuid::new_v4())
            .bind(new_project.owner_id)
            .bind(&new_project.title)
            .bind(&new_project.description)
            .bind(new_project.goal_amount)
            .bind(new_project.deadline)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate::write_error("project", "project title", "user", e))?;

        created.ok_or_else(|| AppError::FailedToCreateEntity("project".to_string()))
    }

    /// Retrieves a non-deleted project by its id.
    pub async fn get_project(&self, project_id: Uuid) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(GET_PROJECT_BY_ID_QUERY)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate::read_error("project", e))?;

        project.ok_or_else(|| AppError::NotFound("project".to_string()))
    }

    /// Retrieves projects owned by a specific user, or all non-deleted
    /// projects when no owner is given. Newest first.
    pub async fn get_projects(&self, owner_id: Option<Uuid>) -> Result<Vec<Project>, AppError> {
        let query = match owner_id {
            Some(owner_id) => {
                sqlx::query_as::<_, Project>(GET_PROJECTS_BY_OWNER_ID_QUERY).bind(owner_id)
            }
            None => sqlx::query_as::<_, Project>(GET_ALL_PROJECTS_QUERY),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| translate::read_error("project", e))
    }
}
