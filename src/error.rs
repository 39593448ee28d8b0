//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It is a closed taxonomy: handlers and repositories only ever surface one of these
//! variants to the API boundary, never raw driver or library error types. The database
//! error translator (`crate::db::translate`) is the single place where low-level
//! `sqlx` failures are mapped into this taxonomy.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly convert
//! application errors into appropriate HTTP responses with JSON bodies. User-visible
//! messages are specific (entity + reason) for 4xx-class failures and genericized
//! for 5xx-class failures.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can surface at the API boundary.
///
/// Variants carrying a `String` hold the entity name the error refers to
/// (e.g. "user", "project"), except `BadRequest`, `InvalidToken`, `Forbidden`,
/// and `Validation` which carry a full message.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// A uniqueness constraint rejected a write (HTTP 400).
    AlreadyExists(String),
    /// A required lookup matched zero rows (HTTP 404).
    NotFound(String),
    /// Login failed: unknown username or wrong password (HTTP 400).
    IncorrectCredentials,
    /// A bearer token was missing, malformed, tampered with, or expired (HTTP 401).
    InvalidToken(String),
    /// The authenticated caller is not allowed to perform this action (HTTP 403).
    Forbidden(String),
    /// A foreign key constraint rejected a write (HTTP 400).
    ForeignKey(String),
    /// Malformed input reached a store operation (HTTP 400).
    BadRequest(String),
    /// An insert with RETURNING produced no row (HTTP 400).
    FailedToCreateEntity(String),
    /// A connection or operational store failure; retryable by the caller (HTTP 500).
    GeneralDatabase(String),
    /// Fail-safe catch-all for unrecognized failures (HTTP 500).
    Internal(String),
    /// Input validation on a request payload failed (HTTP 422).
    Validation(String),
}

/// Uppercases the first character of an entity name for message formatting.
pub(crate) fn capitalize(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::AlreadyExists(entity) => {
                write!(f, "{} with this data already exists", capitalize(entity))
            }
            AppError::NotFound(entity) => write!(f, "{} not found", capitalize(entity)),
            AppError::IncorrectCredentials => write!(f, "Incorrect credentials"),
            AppError::InvalidToken(msg) => write!(f, "{}", msg),
            AppError::Forbidden(msg) => write!(f, "{}", msg),
            AppError::ForeignKey(entity) => {
                write!(f, "{} has foreign key constraints", capitalize(entity))
            }
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::FailedToCreateEntity(entity) => {
                write!(f, "Failed to create {}", capitalize(entity))
            }
            // 5xx-class messages stay generic; details go to the logs at the
            // translation boundary, not to the client.
            AppError::GeneralDatabase(_) => write!(f, "Database error. Try again."),
            AppError::Internal(_) => write!(f, "Unexpected error. Try again."),
            AppError::Validation(msg) => write!(f, "{}", msg),
        }
    }
}

impl AppError {
    /// Detail carried by 5xx variants. `Display` genericizes these for the
    /// client, so the payload is surfaced to the logs instead; this also
    /// covers errors that never pass through the database translator.
    fn server_error_detail(&self) -> Option<&str> {
        match self {
            AppError::GeneralDatabase(detail) | AppError::Internal(detail) => Some(detail),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AlreadyExists(_)
            | AppError::IncorrectCredentials
            | AppError::ForeignKey(_)
            | AppError::BadRequest(_)
            | AppError::FailedToCreateEntity(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::GeneralDatabase(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Some(detail) = self.server_error_detail() {
            log::error!(target: "app", "Server error ({}): {}", self.status_code(), detail);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
