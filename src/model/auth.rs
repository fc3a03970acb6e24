use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::{
    admin::{AdminDto, SuperAdminDto},
    user::UserDto,
};

/// Account kind carried in every access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SocialProviderKind {
    Google,
    Facebook,
    Linkedin,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLoginDto {
    pub provider: SocialProviderKind,
    #[validate(length(min = 1))]
    pub uid: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub display_name: String,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserAuthDto {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminAuthDto {
    pub token: String,
    pub admin: AdminDto,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminAuthDto {
    pub token: String,
    pub super_admin: SuperAdminDto,
}
