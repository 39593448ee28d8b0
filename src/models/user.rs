use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Canonical user entity as stored in the database.
///
/// The password hash is never serialized, and `UserPublic` is the shape
/// returned by the API. Users are only ever soft-deleted via `is_deleted`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: Uuid,
    /// Unique among non-deleted users, stored lowercased.
    pub email: String,
    /// Unique among non-deleted users, stored lowercased.
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Externally visible view of a user, built by field selection.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserPublic {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn into_public(self) -> UserPublic {
        UserPublic {
            user_id: self.user_id,
            email: self.email,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Row values for inserting a new user. The password is already hashed by
/// the time this record exists; plaintext never reaches the repository.
#[derive(Debug)]
pub struct NewUserRecord {
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_view_excludes_password_hash() {
        let user = User {
            user_id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            first_name: Some("Alice".to_string()),
            last_name: None,
            password_hash: "$2b$12$something".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            is_deleted: false,
        };

        let serialized = serde_json::to_value(&user).unwrap();
        assert!(serialized.get("password_hash").is_none());

        let public = serde_json::to_value(user.into_public()).unwrap();
        assert!(public.get("password_hash").is_none());
        assert!(public.get("is_deleted").is_none());
        assert_eq!(public["username"], "alice");
    }
}
