use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CircleRole {
    #[serde(rename = "ICAdmin")]
    IcAdmin,
    Member,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InviteStatus {
    Pending,
    Accept,
    Reject,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCircleDto {
    #[validate(length(min = 1))]
    pub circle_name: String,
    pub circle_description: Option<String>,
    #[serde(default)]
    pub circle_genre: Vec<String>,
    #[serde(default, rename = "ISBN")]
    pub isbn: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CircleDto {
    pub id: i32,
    pub circle_name: String,
    pub circle_description: Option<String>,
    pub created_by: i32,
    pub circle_genre: Vec<String>,
    #[serde(rename = "ISBN")]
    pub isbn: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub user_id: i32,
    pub role: CircleRole,
    pub invite_status: InviteStatus,
    pub added_by: i32,
    pub added_at: DateTime<Utc>,
    pub is_removed: bool,
    pub removed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CircleMembersDto {
    pub circle: CircleDto,
    pub members: Vec<MemberDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteDto {
    pub user_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CircleGenreDto {
    #[validate(length(min = 1))]
    pub genre: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CircleIsbnDto {
    #[validate(length(min = 1))]
    pub isbn: String,
}
