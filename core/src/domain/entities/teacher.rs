//! Teacher profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::student::Gender;

/// Teacher profile, owned by a `User` with the teacher role
///
/// Shares the aggregate-delete contract of `Student`: profile, owning
/// user, and refresh tokens are removed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique identifier for the teacher profile
    pub id: Uuid,

    /// Login identity backing this profile
    pub user_id: Uuid,

    /// School (tenant) the teacher works at
    pub school_id: Uuid,

    /// First name
    pub firstname: String,

    /// Last name
    pub lastname: String,

    /// Gender
    pub gender: Gender,

    /// Contact phone number
    pub phone: Option<String>,

    /// Postal address
    pub address: Option<String>,

    /// Timestamp when the profile was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    /// Creates a new Teacher profile
    pub fn new(
        user_id: Uuid,
        school_id: Uuid,
        firstname: String,
        lastname: String,
        gender: Gender,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            school_id,
            firstname,
            lastname,
            gender,
            phone: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}
