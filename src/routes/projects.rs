use crate::{
    auth::CurrentUser,
    db::repositories::{ContributionRepository, ProjectRepository},
    error::AppError,
    models::{ContributionPublic, NewContribution, NewProject, ProjectPublic},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    /// Filter projects by owner.
    pub owner_id: Option<Uuid>,
}

/// Create a new project.
///
/// Requires authentication; the caller may only create projects for
/// themselves. The deadline must be strictly in the future.
#[post("")]
pub async fn create_project(
    pool: web::Data<PgPool>,
    new_project: web::Json<NewProject>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    new_project.validate()?;

    if user.0.user_id != new_project.owner_id {
        return Err(AppError::Forbidden(
            "You can only create projects for yourself.".to_string(),
        ));
    }

    let project = ProjectRepository::new(pool.get_ref().clone())
        .create_project(&new_project)
        .await?;

    Ok(HttpResponse::Created().json(project.into_public()))
}

/// List projects, optionally filtered by owner. Newest first.
#[get("")]
pub async fn get_projects(
    pool: web::Data<PgPool>,
    query: web::Query<ProjectsQuery>,
) -> Result<impl Responder, AppError> {
    let projects = ProjectRepository::new(pool.get_ref().clone())
        .get_projects(query.owner_id)
        .await?;

    let public: Vec<ProjectPublic> = projects.into_iter().map(|p| p.into_public()).collect();
    Ok(HttpResponse::Ok().json(public))
}

/// Get a project by its id.
#[get("/{project_id}")]
pub async fn get_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let project = ProjectRepository::new(pool.get_ref().clone())
        .get_project(project_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(project.into_public()))
}

/// Contribute to a project.
///
/// The project must exist, not be soft-deleted, and its deadline must be
/// in the future at submission time.
#[post("/{project_id}/contribute")]
pub async fn create_contribution(
    pool: web::Data<PgPool>,
    project_id: web::Path<Uuid>,
    new_contribution: web::Json<NewContribution>,
    _user: CurrentUser,
) -> Result<impl Responder, AppError> {
    new_contribution.validate()?;
    let project_id = project_id.into_inner();

    let project = ProjectRepository::new(pool.get_ref().clone())
        .get_project(project_id)
        .await?;
    if project.deadline_passed() {
        return Err(AppError::BadRequest(
            "Project deadline has passed.".to_string(),
        ));
    }

    let contribution = ContributionRepository::new(pool.get_ref().clone())
        .create_contribution(project_id, &new_contribution)
        .await?;

    Ok(HttpResponse::Created().json(contribution.into_public()))
}

/// List a project's contributions, newest first.
#[get("/{project_id}/contributions")]
pub async fn get_contributions(
    pool: web::Data<PgPool>,
    project_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let contributions = ContributionRepository::new(pool.get_ref().clone())
        .get_contributions(project_id.into_inner())
        .await?;

    let public: Vec<ContributionPublic> = contributions
        .into_iter()
        .map(|c| c.into_public())
        .collect();
    Ok(HttpResponse::Ok().json(public))
}
