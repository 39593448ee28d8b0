//! Contribution repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::translate;
use crate::error::AppError;
use crate::models::{Contribution, NewContribution};

const CREATE_CONTRIBUTION_QUERY: &str = "INSERT INTO contributions (id, project_id, contributor_id, amount) \
     VALUES ($1, $2, $3, $4) \
     RETURNING id, project_id, contributor_id, amount, created_at, updated_at, is_deleted";

const GET_CONTRIBUTIONS_BY_PROJECT_ID_QUERY: &str = "SELECT id, project_id, contributor_id, amount, created_at, updated_at, is_deleted \
     FROM contributions WHERE project_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC";

const GET_CONTRIBUTIONS_BY_CONTRIBUTOR_ID_QUERY: &str = "SELECT id, project_id, contributor_id, amount, created_at, updated_at, is_deleted \
     FROM contributions WHERE contributor_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC";

/// Contains logic for all contribution operations.
#[derive(Clone)]
pub struct ContributionRepository {
    pool: PgPool,
}

impl ContributionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a contribution against a project. A dangling project or
    /// contributor reference surfaces as `ForeignKey("project")`.
    pub async fn create_contribution(
        &self,
        project_id: Uuid,
        new_contribution: &NewContribution,
    ) -> Result<Contribution, AppError> {
        let created = sqlx::query_as::<_, Contribution>(CREATE_CONTRIBUTION_QUERY)
            .bind(Uuid::new_v4())
            .bind(project_id)
            .bind(new_contribution.contributor_id)
            .bind(new_contribution.amount)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                translate::write_error("contribution", "contribution id", "project", e)
            })?;

        created.ok_or_else(|| AppError::FailedToCreateEntity("contribution".to_string()))
    }

    /// Retrieves all non-deleted contributions to a project, newest first.
    pub async fn get_contributions(&self, project_id: Uuid) -> Result<Vec<Contribution>, AppError> {
        sqlx::query_as::<_, Contribution>(GET_CONTRIBUTIONS_BY_PROJECT_ID_QUERY)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| translate::read_error("contribution", e))
    }

    /// Retrieves all non-deleted contributions made by a user, newest first.
    pub async fn get_contributions_by_contributor(
        &self,
        contributor_id: Uuid,
    ) -> Result<Vec<Contribution>, AppError> {
        sqlx::query_as::<_, Contribution>(GET_CONTRIBUTIONS_BY_CONTRIBUTOR_ID_QUERY)
            .bind(contributor_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| translate::read_error("contribution", e))
    }
}
