//! User entity representing a login identity in the SchoolMgmt system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// School administrator
    Admin,
    /// Teaching staff
    Teacher,
    /// Enrolled student
    Student,
}

impl Role {
    /// Stable string form used in JWT claims and database columns
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// User entity representing a registered login identity
///
/// Every user belongs to exactly one school (the tenant). The email is
/// globally unique across all tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login email, globally unique
    pub email: String,

    /// Bcrypt hash of the password, never the plaintext
    pub password_hash: String,

    /// Role of the account
    pub role: Role,

    /// School (tenant) this user belongs to
    pub school_id: Uuid,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(email: String, password_hash: String, role: Role, school_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role,
            school_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Checks if the user holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Checks if the user holds the teacher role
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    /// Checks if the user holds the student role
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let school_id = Uuid::new_v4();
        let user = User::new(
            "admin@greenfield.edu".to_string(),
            "$2b$12$hash".to_string(),
            Role::Admin,
            school_id,
        );

        assert_eq!(user.email, "admin@greenfield.edu");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.school_id, school_id);
        assert!(user.is_admin());
        assert!(!user.is_teacher());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("principal".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Teacher).unwrap();
        assert_eq!(json, "\"teacher\"");
    }

    #[test]
    fn test_set_password_hash() {
        let mut user = User::new(
            "a@b.edu".to_string(),
            "old".to_string(),
            Role::Student,
            Uuid::new_v4(),
        );
        user.set_password_hash("new".to_string());
        assert_eq!(user.password_hash, "new");
    }
}
