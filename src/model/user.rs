use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    #[validate(length(min = 3))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 10))]
    pub mobile_number: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub user_type: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 3))]
    pub full_name: Option<String>,
    #[validate(length(min = 10))]
    pub mobile_number: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LifecycleDto {
    /// One of `active`, `deactivated` or `deleted`.
    pub state: String,
    pub at: Option<DateTime<Utc>>,
    pub by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    pub user_type: String,
    pub profile_image: Option<String>,
    pub is_verified: bool,
    pub lifecycle: LifecycleDto,
    /// Circles the user has joined.
    pub inner_circle: Vec<i32>,
    /// Circles the user has been invited to and not yet answered.
    pub invites: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedUsersDto {
    pub users: Vec<UserDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// The part of a reader's profile shown to other readers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileDto {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub profile_image: Option<String>,
}
