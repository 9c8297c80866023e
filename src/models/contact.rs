use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::{db::column, error::AppError, guard::Owned};

/// Represents a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// The unique identifier for the contact.
    pub id: i64,
    /// The username of the user who owns the contact.
    pub owner: String,
    pub firstname: String,
    pub lastname: String,
    pub fullname: String,
    pub home_address: String,
    pub email: String,
    pub phone_number: String,
    /// The timestamp when the contact was created.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Row> for Contact {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: column(row, "id")?,
            owner: column(row, "owner")?,
            firstname: column(row, "firstname")?,
            lastname: column(row, "lastname")?,
            fullname: column(row, "fullname")?,
            home_address: column(row, "home_address")?,
            email: column(row, "email")?,
            phone_number: column(row, "phone_number")?,
            created_at: column(row, "created_at")?,
        })
    }
}

impl Owned for Contact {
    const KIND: &'static str = "contact";

    fn owner(&self) -> &str {
        &self.owner
    }
}
