//! Student and teacher profile DTOs; the two resources share a shape.

use serde::{Deserialize, Serialize};
use validator::Validate;

use sm_core::domain::entities::student::Gender;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 60))]
    pub firstname: String,
    #[validate(length(min = 1, max = 60))]
    pub lastname: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub gender: Gender,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 60))]
    pub firstname: Option<String>,
    #[validate(length(min = 1, max = 60))]
    pub lastname: Option<String>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
