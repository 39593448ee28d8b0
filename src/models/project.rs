use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Canonical project entity as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub project_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    /// Funding goal; the store enforces `goal_amount >= 0` as a check constraint.
    pub goal_amount: i64,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Externally visible view of a project, built by field selection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectPublic {
    pub project_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub goal_amount: i64,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn into_public(self) -> ProjectPublic {
        ProjectPublic {
            project_id: self.project_id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            goal_amount: self.goal_amount,
            deadline: self.deadline,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Contributions are only accepted while the deadline is in the future.
    pub fn deadline_passed(&self) -> bool {
        self.deadline < Utc::now()
    }
}

/// Payload for creating a project. The deadline must be strictly in the
/// future at creation time.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewProject {
    pub owner_id: Uuid,

    #[validate(length(min = 3, max = 255))]
    pub title: String,

    #[validate(length(min = 10))]
    pub description: String,

    #[validate(range(min = 0))]
    pub goal_amount: i64,

    #[validate(custom = "validate_future_deadline")]
    pub deadline: DateTime<Utc>,
}

fn validate_future_deadline(deadline: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *deadline <= Utc::now() {
        return Err(ValidationError::new("deadline_must_be_in_the_future"));
    }
    Ok(())
}
