//! User repository: creation and lookup by unique key, with all failures
//! translated into the domain error taxonomy at this boundary.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::translate;
use crate::error::AppError;
use crate::models::{NewUserRecord, User};

const CREATE_USER_QUERY: &str = "INSERT INTO users (user_id, email, username, first_name, last_name, password_hash) \
     VALUES ($1, $2, $3, $4, $5, $6) \
     RETURNING user_id, email, username, first_name, last_name, password_hash, created_at, updated_at, is_deleted";

const GET_USER_BY_ID_QUERY: &str = "SELECT user_id, email, username, first_name, last_name, password_hash, created_at, updated_at, is_deleted \
     FROM users WHERE user_id = $1 AND is_deleted = FALSE";

const GET_USER_BY_EMAIL_QUERY: &str = "SELECT user_id, email, username, first_name, last_name, password_hash, created_at, updated_at, is_deleted \
     FROM users WHERE email = $1 AND is_deleted = FALSE";

const GET_USER_BY_USERNAME_QUERY: &str = "SELECT user_id, email, username, first_name, last_name, password_hash, created_at, updated_at, is_deleted \
     FROM users WHERE username = $1 AND is_deleted = FALSE";

/// Lookup criteria for `get_user`. Exactly one field should be set.
///
/// Documented quirk, preserved from the reference behavior: when more than
/// one field is set, the first non-empty criterion wins in `user_id`,
/// `email`, `username` order and the rest are silently ignored. With no
/// criteria the call fails with a usage error.
#[derive(Debug, Default)]
pub struct UserLookup {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ResolvedLookup<'a> {
    Id(Uuid),
    Email(&'a str),
    Username(&'a str),
}

impl UserLookup {
    pub fn by_id(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn by_email(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            ..Self::default()
        }
    }

    pub fn by_username(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            ..Self::default()
        }
    }

    /// Picks the winning criterion, or fails if none is set.
    pub(crate) fn resolve(&self) -> Result<ResolvedLookup<'_>, AppError> {
        if let Some(user_id) = self.user_id {
            return Ok(ResolvedLookup::Id(user_id));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            return Ok(ResolvedLookup::Email(email));
        }
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return Ok(ResolvedLookup::Username(username));
        }
        Err(AppError::BadRequest(
            "No search criteria provided".to_string(),
        ))
    }
}

/// Contains logic for all user operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new user. A duplicate email or username among non-deleted
    /// users surfaces as `AlreadyExists("user email")`.
    pub async fn create_user(&self, new_user: NewUserRecord) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(CREATE_USER_QUERY)
            .bind(Uuid::new_v4())
            .bind(&new_user.email)
            .bind(&new_user.username)
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(&new_user.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate::write_error("user", "user email", "user", e))?;

        created.ok_or_else(|| AppError::FailedToCreateEntity("user".to_string()))
    }

    /// Retrieves a user by id, email, or username (first non-empty
    /// criterion wins). Soft-deleted users are never returned.
    pub async fn get_user(&self, lookup: &UserLookup) -> Result<User, AppError> {
        let query = match lookup.resolve()? {
            ResolvedLookup::Id(user_id) => {
                sqlx::query_as::<_, User>(GET_USER_BY_ID_QUERY).bind(user_id)
            }
            ResolvedLookup::Email(email) => {
                sqlx::query_as::<_, User>(GET_USER_BY_EMAIL_QUERY).bind(email.to_string())
            }
            ResolvedLookup::Username(username) => {
                sqlx::query_as::<_, User>(GET_USER_BY_USERNAME_QUERY).bind(username.to_string())
            }
        };

        let user = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate::read_error("user", e))?;

        user.ok_or_else(|| AppError::NotFound("user".to_string()))
    }
}
