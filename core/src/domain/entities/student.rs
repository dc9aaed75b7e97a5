//! Student profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender of a student or teacher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Student profile, owned by a `User` with the student role
///
/// Deleting a student is an aggregate operation: the profile row, the
/// owning user row, and that user's refresh tokens go together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier for the student profile
    pub id: Uuid,

    /// Login identity backing this profile
    pub user_id: Uuid,

    /// School (tenant) the student is enrolled in
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

impl Student {
    /// Creates a new Student profile
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student() {
        let student = Student::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            Gender::Female,
        );
        assert_eq!(student.full_name(), "Ada Lovelace");
        assert!(student.phone.is_none());
    }

    #[test]
    fn test_gender_serialization() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"male\"");
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
    }
}
