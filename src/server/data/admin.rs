//! Admin and super admin account repositories.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        admin::{Admin, RegisterAdminParams, SuperAdmin, UpdateAdminParams},
        lifecycle::{self, Lifecycle},
    },
};

/// Repository providing database operations for admin accounts.
pub struct AdminRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AdminRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an unverified, active admin.
    pub async fn create(&self, params: RegisterAdminParams) -> Result<Admin, AppError> {
        let now = Utc::now();
        let entity = entity::admin::ActiveModel {
            full_name: ActiveValue::Set(params.full_name),
            email: ActiveValue::Set(params.email),
            mobile_number: ActiveValue::Set(params.mobile_number),
            password_hash: ActiveValue::Set(params.password_hash),
            is_verified: ActiveValue::Set(false),
            verified_by: ActiveValue::Set(None),
            lifecycle: ActiveValue::Set(lifecycle::ACTIVE.to_string()),
            lifecycle_at: ActiveValue::Set(None),
            lifecycle_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Admin::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Admin>, AppError> {
        entity::prelude::Admin::find_by_id(id)
            .one(self.db)
            .await?
            .map(Admin::from_entity)
            .transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AppError> {
        entity::prelude::Admin::find()
            .filter(entity::admin::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await?
            .map(Admin::from_entity)
            .transpose()
    }

    /// Gets every admin that is not deleted, ordered by id.
    pub async fn get_all(&self) -> Result<Vec<Admin>, AppError> {
        entity::prelude::Admin::find()
            .filter(entity::admin::Column::Lifecycle.ne(lifecycle::DELETED))
            .order_by_asc(entity::admin::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Admin::from_entity)
            .collect()
    }

    /// Applies the given profile changes.
    ///
    /// # Returns
    /// - `Ok(Some(Admin))` - Updated admin
    /// - `Ok(None)` - No admin with that id
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn update(&self, id: i32, params: UpdateAdminParams) -> Result<Option<Admin>, AppError> {
        let Some(entity) = entity::prelude::Admin::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(full_name) = params.full_name {
            active.full_name = ActiveValue::Set(full_name);
        }
        if let Some(mobile_number) = params.mobile_number {
            active.mobile_number = ActiveValue::Set(mobile_number);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Admin::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Marks the admin verified by the given super admin.
    pub async fn verify(&self, id: i32, verified_by: i32) -> Result<Option<Admin>, AppError> {
        let Some(entity) = entity::prelude::Admin::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.is_verified = ActiveValue::Set(true);
        active.verified_by = ActiveValue::Set(Some(verified_by));
        active.updated_at = ActiveValue::Set(Utc::now());

        Admin::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn set_lifecycle(&self, id: i32, lifecycle: Lifecycle) -> Result<Option<Admin>, AppError> {
        let Some(entity) = entity::prelude::Admin::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let (state, at, by) = lifecycle.into_columns();
        let mut active = entity.into_active_model();
        active.lifecycle = ActiveValue::Set(state);
        active.lifecycle_at = ActiveValue::Set(at);
        active.lifecycle_by = ActiveValue::Set(by);
        active.updated_at = ActiveValue::Set(Utc::now());

        Admin::from_entity(active.update(self.db).await?).map(Some)
    }
}

/// Repository providing database operations for super admin accounts.
pub struct SuperAdminRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SuperAdminRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active super admin.
    pub async fn create(&self, params: RegisterAdminParams) -> Result<SuperAdmin, AppError> {
        let now = Utc::now();
        let entity = entity::super_admin::ActiveModel {
            full_name: ActiveValue::Set(params.full_name),
            email: ActiveValue::Set(params.email),
            mobile_number: ActiveValue::Set(params.mobile_number),
            password_hash: ActiveValue::Set(params.password_hash),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(SuperAdmin::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<SuperAdmin>, AppError> {
        Ok(entity::prelude::SuperAdmin::find_by_id(id)
            .one(self.db)
            .await?
            .map(SuperAdmin::from_entity))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<SuperAdmin>, AppError> {
        Ok(entity::prelude::SuperAdmin::find()
            .filter(entity::super_admin::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await?
            .map(SuperAdmin::from_entity))
    }

    /// Checks if any super admin exists.
    ///
    /// Used to allow super admin registration only on first-time setup.
    pub async fn exists(&self) -> Result<bool, AppError> {
        let count = entity::prelude::SuperAdmin::find().count(self.db).await?;

        Ok(count > 0)
    }
}
