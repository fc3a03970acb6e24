//! Reader domain models and parameters.
//!
//! Provides the domain model for reader accounts, their public profile and the
//! parameter types for registration, social sign-in and profile updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::{
        auth::{SocialLoginDto, SocialProviderKind},
        user::{PaginatedUsersDto, PublicProfileDto, RegisterUserDto, UpdateUserDto, UserDto},
    },
    server::{
        error::AppError,
        model::{circle::CircleMemberships, decode_json, lifecycle::Lifecycle},
    },
};

/// A social login provider linked to a reader account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProvider {
    /// Provider-side user id.
    pub id: String,
    pub provider: SocialProviderKind,
    pub email: String,
}

/// Reader account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    /// Bcrypt hash; absent for accounts created through social login.
    pub password_hash: Option<String>,
    pub user_type: String,
    pub profile_image: Option<String>,
    pub social_providers: Vec<SocialProvider>,
    pub is_verified: bool,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr)` - Stored lifecycle or provider list is unreadable
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let lifecycle = Lifecycle::from_columns(
            "user.lifecycle",
            &entity.lifecycle,
            entity.lifecycle_at,
            entity.lifecycle_by,
        )?;
        let social_providers = decode_json("user.social_providers", entity.social_providers)?;

        Ok(Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            mobile_number: entity.mobile_number,
            password_hash: entity.password_hash,
            user_type: entity.user_type,
            profile_image: entity.profile_image,
            social_providers,
            is_verified: entity.is_verified,
            lifecycle,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn has_provider(&self, provider: SocialProviderKind, email: &str) -> bool {
        self.social_providers
            .iter()
            .any(|p| p.provider == provider && p.email.eq_ignore_ascii_case(email))
    }

    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            profile_image: self.profile_image.clone(),
        }
    }

    /// Converts the user to a DTO with their circle membership lists attached.
    pub fn into_dto(self, memberships: CircleMemberships) -> UserDto {
        UserDto {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            mobile_number: self.mobile_number,
            user_type: self.user_type,
            profile_image: self.profile_image,
            is_verified: self.is_verified,
            lifecycle: self.lifecycle.into_dto(),
            inner_circle: memberships.inner_circle,
            invites: memberships.invites,
            created_at: self.created_at,
        }
    }
}

/// A reader together with the circles they belong to and are invited to.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: User,
    pub memberships: CircleMemberships,
}

impl UserProfile {
    pub fn into_dto(self) -> UserDto {
        self.user.into_dto(self.memberships)
    }
}

/// The part of a reader's profile shown to other readers.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicProfile {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

impl PublicProfile {
    pub fn into_dto(self) -> PublicProfileDto {
        PublicProfileDto {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            profile_image: self.profile_image,
        }
    }
}

/// Parameters for creating a reader account.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub full_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    pub password_hash: Option<String>,
    pub user_type: String,
    pub profile_image: Option<String>,
    pub social_providers: Vec<SocialProvider>,
    /// Social sign-ins arrive already verified by the provider.
    pub is_verified: bool,
}

impl CreateUserParams {
    /// Builds parameters for a password registration.
    ///
    /// # Arguments
    /// - `dto` - Validated registration body
    /// - `password_hash` - Bcrypt hash of `dto.password`
    pub fn from_registration(dto: RegisterUserDto, password_hash: String) -> Self {
        Self {
            full_name: dto.full_name,
            email: dto.email.to_lowercase(),
            mobile_number: Some(dto.mobile_number),
            password_hash: Some(password_hash),
            user_type: dto.user_type,
            profile_image: None,
            social_providers: Vec::new(),
            is_verified: false,
        }
    }
}

/// Account type given to readers created through social sign-in.
pub const SOCIAL_USER_TYPE: &str = "user";

/// A social sign-in as reported by the provider's client SDK.
#[derive(Debug, Clone)]
pub struct SocialLoginParams {
    pub provider: SocialProviderKind,
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
}

impl SocialLoginParams {
    pub fn from_dto(dto: SocialLoginDto) -> Self {
        Self {
            provider: dto.provider,
            uid: dto.uid,
            email: dto.email.to_lowercase(),
            display_name: dto.display_name,
            phone_number: dto.phone_number.filter(|p| !p.is_empty()),
            photo_url: dto.photo_url,
        }
    }

    pub fn provider_link(&self) -> SocialProvider {
        SocialProvider {
            id: self.uid.clone(),
            provider: self.provider,
            email: self.email.clone(),
        }
    }

    /// Parameters for a new reader created from this sign-in.
    pub fn into_create_params(self) -> CreateUserParams {
        let link = self.provider_link();
        CreateUserParams {
            full_name: self.display_name,
            email: self.email,
            mobile_number: self.phone_number,
            password_hash: None,
            user_type: SOCIAL_USER_TYPE.to_string(),
            profile_image: self.photo_url,
            social_providers: vec![link],
            is_verified: true,
        }
    }
}

/// Profile fields a reader or admin may change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub profile_image: Option<String>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            full_name: dto.full_name,
            mobile_number: dto.mobile_number,
            profile_image: dto.profile_image,
        }
    }
}

/// Paginated collection of readers with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    /// Readers for this page.
    pub users: Vec<UserProfile>,
    /// Total number of readers across all pages.
    pub total: u64,
    /// Current page number (zero-indexed).
    pub page: u64,
    /// Number of readers per page.
    pub per_page: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(UserProfile::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
