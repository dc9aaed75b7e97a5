//! Attendance DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sm_core::domain::entities::attendance::AttendanceKind;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceRequest {
    pub student_id: Uuid,
    #[validate(length(min = 1, max = 120))]
    pub subject: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub kind: AttendanceKind,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub kind: AttendanceKind,
    pub description: Option<String>,
}

/// Per-subject attendance summary for a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub subject: String,
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
}
