use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes a plaintext password with bcrypt (salted, one-way).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, 12) // bcrypt default cost is 12
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verifies a plaintext password against a stored bcrypt digest.
/// A wrong password yields `Ok(false)`, never an error.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
