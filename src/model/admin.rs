use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::user::LifecycleDto;

/// Registration body shared by admins and the super admin.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminDto {
    #[validate(length(min = 3))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 10))]
    pub mobile_number: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminDto {
    #[validate(length(min = 3))]
    pub full_name: Option<String>,
    #[validate(length(min = 10))]
    pub mobile_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub is_verified: bool,
    pub verified_by: Option<i32>,
    pub lifecycle: LifecycleDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminDto {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
