//! Attendance record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of attendance mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceKind {
    Present,
    Absent,
    Leave,
}

impl Default for AttendanceKind {
    fn default() -> Self {
        AttendanceKind::Present
    }
}

/// Attendance record taken by a teacher for a student
///
/// `teacher_id` identifies the authoring teacher profile and drives the
/// ownership rule: only the author (or a same-school admin) may change
/// or delete the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Teacher profile that authored the record
    pub teacher_id: Uuid,

    /// Student the record is about
    pub student_id: Uuid,

    /// School (tenant) the record belongs to
    pub school_id: Uuid,

    /// Subject the class was held for
    pub subject: String,

    /// Date of the class
    pub date: DateTime<Utc>,

    /// The attendance mark
    pub kind: AttendanceKind,

    /// Optional free-form note
    pub description: Option<String>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl Attendance {
    /// Creates a new attendance record
    pub fn new(
        teacher_id: Uuid,
        student_id: Uuid,
        school_id: Uuid,
        subject: String,
        date: DateTime<Utc>,
        kind: AttendanceKind,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            teacher_id,
            student_id,
            school_id,
            subject,
            date,
            kind,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Updates the mutable fields of the record
    pub fn amend(&mut self, kind: AttendanceKind, description: Option<String>) {
        self.kind = kind;
        self.description = description;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attendance_defaults() {
        let record = Attendance::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Mathematics".to_string(),
            Utc::now(),
            AttendanceKind::default(),
        );
        assert_eq!(record.kind, AttendanceKind::Present);
        assert!(record.description.is_none());
    }

    #[test]
    fn test_amend() {
        let mut record = Attendance::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Physics".to_string(),
            Utc::now(),
            AttendanceKind::Present,
        );
        record.amend(AttendanceKind::Leave, Some("doctor visit".to_string()));
        assert_eq!(record.kind, AttendanceKind::Leave);
        assert_eq!(record.description.as_deref(), Some("doctor visit"));
    }
}
