//!
//! # Database Error Translation
//!
//! Single boundary where low-level `sqlx` failures become domain errors.
//! Every repository operation maps its errors here before returning, so the
//! only error types escaping the data layer are `AppError` variants.
//!
//! The original failure is logged with full context before being mapped:
//! entities carrying sensitive data (user, profile) log to the `audit`
//! channel, everything else to the `app` channel. The caller only ever sees
//! the mapped kind.

use crate::error::AppError;

/// Entities whose failures are routed to the audit log channel.
const AUDIT_ENTITIES: [&str; 2] = ["user", "profile"];

/// Postgres SQLSTATE: unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE: foreign key constraint violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres SQLSTATE: check constraint violation.
const CHECK_VIOLATION: &str = "23514";

fn log_failure(entity: &str, context: &str, err: &sqlx::Error) {
    if AUDIT_ENTITIES.contains(&entity.to_lowercase().as_str()) {
        log::error!(target: "audit", "{} for {}: {}", context, entity, err);
    } else {
        log::error!(target: "app", "{} for {}: {}", context, entity, err);
    }
}

/// Maps a constraint-violation SQLSTATE to a domain error for a write.
///
/// `unique_entity` and `fk_entity` name what the client actually collided
/// with ("user email", "project"), which may differ from the entity being
/// written.
fn write_violation(entity: &str, unique_entity: &str, fk_entity: &str, code: &str) -> AppError {
    match code {
        UNIQUE_VIOLATION => AppError::AlreadyExists(unique_entity.to_string()),
        FOREIGN_KEY_VIOLATION => AppError::ForeignKey(fk_entity.to_string()),
        // Check violations and data exceptions (class 22) mean the input
        // itself was malformed.
        CHECK_VIOLATION => AppError::BadRequest(format!(
            "Bad Request: Invalid details for {}",
            entity
        )),
        c if c.starts_with("22") => {
            AppError::BadRequest(format!("Bad Request: Invalid details for {}", entity))
        }
        _ => AppError::GeneralDatabase(entity.to_string()),
    }
}

fn is_connection_failure(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

fn is_usage_failure(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::Protocol(_)
    )
}

/// Translates a failure from a read (lookup) operation.
pub fn read_error(entity: &str, err: sqlx::Error) -> AppError {
    log_failure(entity, "Database read error", &err);
    match err {
        sqlx::Error::RowNotFound => AppError::NotFound(entity.to_string()),
        e if is_connection_failure(&e) => AppError::GeneralDatabase(entity.to_string()),
        e if is_usage_failure(&e) => {
            AppError::BadRequest(format!("Bad Request: Invalid details for {}", entity))
        }
        _ => AppError::Internal("Unexpected error. Try again.".to_string()),
    }
}

/// Translates a failure from a write (insert/update) operation.
///
/// Constraint violations are distinguished by SQLSTATE so that the caller
/// receives `AlreadyExists` for duplicates and `ForeignKey` for dangling
/// references instead of an opaque database error.
pub fn write_error(
    entity: &str,
    unique_entity: &str,
    fk_entity: &str,
    err: sqlx::Error,
) -> AppError {
    log_failure(entity, "Database write error", &err);
    match err {
        sqlx::Error::Database(db) => match db.code() {
            Some(code) => write_violation(entity, unique_entity, fk_entity, &code),
            None => AppError::GeneralDatabase(entity.to_string()),
        },
        sqlx::Error::RowNotFound => AppError::NotFound(entity.to_string()),
        e if is_connection_failure(&e) => AppError::GeneralDatabase(entity.to_string()),
        e if is_usage_failure(&e) => {
            AppError::BadRequest(format!("Bad Request: Invalid details for {}", entity))
        }
        _ => AppError::Internal("Unexpected error. Try again.".to_string()),
    }
}
