use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::{db::column, error::AppError, guard::Owned};

/// Represents a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// The unique identifier for the skill.
    pub id: i64,
    /// The username of the user who owns the skill.
    pub owner: String,
    /// The name of the skill, e.g. `rust`.
    pub skill_name: String,
    /// The level of the skill, e.g. `expert`.
    pub skill_level: String,
    /// The timestamp when the skill was created.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Row> for Skill {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: column(row, "id")?,
            owner: column(row, "owner")?,
            skill_name: column(row, "skill_name")?,
            skill_level: column(row, "skill_level")?,
            created_at: column(row, "created_at")?,
        })
    }
}

impl Owned for Skill {
    const KIND: &'static str = "skill";

    fn owner(&self) -> &str {
        &self.owner
    }
}

/// Binds a skill to a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSkill {
    pub id: i64,
    pub owner: String,
    pub contact_id: i64,
    pub skill_id: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Row> for ContactSkill {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: column(row, "id")?,
            owner: column(row, "owner")?,
            contact_id: column(row, "contact_id")?,
            skill_id: column(row, "skill_id")?,
            created_at: column(row, "created_at")?,
        })
    }
}

impl Owned for ContactSkill {
    const KIND: &'static str = "contact skill";

    fn owner(&self) -> &str {
        &self.owner
    }
}
