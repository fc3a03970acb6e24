//! Admin and super admin domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::admin::{AdminDto, RegisterAdminDto, SuperAdminDto, UpdateAdminDto},
    server::{error::AppError, model::lifecycle::Lifecycle},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Admin {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    /// Admins cannot log in until a super admin verifies them.
    pub is_verified: bool,
    /// Super admin who performed the verification.
    pub verified_by: Option<i32>,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn from_entity(entity: entity::admin::Model) -> Result<Self, AppError> {
        let lifecycle = Lifecycle::from_columns(
            "admin.lifecycle",
            &entity.lifecycle,
            entity.lifecycle_at,
            entity.lifecycle_by,
        )?;

        Ok(Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            mobile_number: entity.mobile_number,
            password_hash: entity.password_hash,
            is_verified: entity.is_verified,
            verified_by: entity.verified_by,
            lifecycle,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> AdminDto {
        AdminDto {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            mobile_number: self.mobile_number,
            is_verified: self.is_verified,
            verified_by: self.verified_by,
            lifecycle: self.lifecycle.into_dto(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuperAdmin {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl SuperAdmin {
    pub fn from_entity(entity: entity::super_admin::Model) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            mobile_number: entity.mobile_number,
            password_hash: entity.password_hash,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> SuperAdminDto {
        SuperAdminDto {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            mobile_number: self.mobile_number,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Parameters for registering an admin or the super admin.
#[derive(Debug, Clone)]
pub struct RegisterAdminParams {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
}

impl RegisterAdminParams {
    pub fn from_dto(dto: RegisterAdminDto, password_hash: String) -> Self {
        Self {
            full_name: dto.full_name,
            email: dto.email.to_lowercase(),
            mobile_number: dto.mobile_number,
            password_hash,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAdminParams {
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
}

impl UpdateAdminParams {
    pub fn from_dto(dto: UpdateAdminDto) -> Self {
        Self {
            full_name: dto.full_name,
            mobile_number: dto.mobile_number,
        }
    }
}
