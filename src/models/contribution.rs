use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Canonical contribution entity as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contribution {
    pub id: Uuid,
    pub project_id: Uuid,
    pub contributor_id: Uuid,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Externally visible view of a contribution, built by field selection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContributionPublic {
    pub id: Uuid,
    pub project_id: Uuid,
    pub contributor_id: Uuid,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contribution {
    pub fn into_public(self) -> ContributionPublic {
        ContributionPublic {
            id: self.id,
            project_id: self.project_id,
            contributor_id: self.contributor_id,
            amount: self.amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Payload for contributing to a project. The target project id comes from
/// the URL path, not the payload.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewContribution {
    pub contributor_id: Uuid,

    /// Minimum contribution is 1.
    #[validate(range(min = 1))]
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contribution() {
        let input = NewContribution {
            contributor_id: Uuid::new_v4(),
            amount: 10,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let input = NewContribution {
            contributor_id: Uuid::new_v4(),
            amount: 0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let input = NewContribution {
            contributor_id: Uuid::new_v4(),
            amount: -50,
        };
        assert!(input.validate().is_err());
    }
}
