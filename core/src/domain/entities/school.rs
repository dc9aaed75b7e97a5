//! School entity - the tenant boundary of the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// School entity, the unit of data isolation
///
/// Every other domain entity carries the id of the school that owns it.
/// School names are unique across the whole system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// Unique identifier for the school
    pub id: Uuid,

    /// Display name, unique across all schools
    pub name: String,

    /// Contact email
    pub email: String,

    /// Postal address
    pub address: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Public website URL
    pub website: Option<String>,

    /// Logo URL
    pub logo: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// Timestamp when the school was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the school was last updated
    pub updated_at: DateTime<Utc>,
}

impl School {
    /// Creates a new School instance
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            address: None,
            phone: None,
            website: None,
            logo: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the optional contact fields in one go
    pub fn with_contact(
        mut self,
        address: Option<String>,
        phone: Option<String>,
        website: Option<String>,
    ) -> Self {
        self.address = address;
        self.phone = phone;
        self.website = website;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_school() {
        let school = School::new("Greenfield High".to_string(), "office@greenfield.edu".to_string());
        assert_eq!(school.name, "Greenfield High");
        assert!(school.address.is_none());
    }

    #[test]
    fn test_with_contact() {
        let school = School::new("Hillside".to_string(), "office@hillside.edu".to_string())
            .with_contact(Some("1 Hill Rd".to_string()), None, Some("hillside.edu".to_string()));
        assert_eq!(school.address.as_deref(), Some("1 Hill Rd"));
        assert!(school.phone.is_none());
        assert_eq!(school.website.as_deref(), Some("hillside.edu"));
    }
}
