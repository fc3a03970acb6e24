//! Reader account repository.
//!
//! This module provides the `UserRepository` for managing reader records in the database.
//! It handles account creation, profile updates, lifecycle transitions, social provider
//! links and the queries used by purging and analytics, converting entity models to
//! domain models at the infrastructure boundary.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        encode_json,
        lifecycle::{self, Lifecycle},
        user::{CreateUserParams, SocialProvider, UpdateUserParams, User},
    },
};

/// Repository providing database operations for reader accounts.
///
/// Generic over the connection so the same queries run directly against the pool
/// or inside a transaction.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to a database connection or transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new active reader.
    ///
    /// # Arguments
    /// - `params` - Account fields; the email is stored as given
    ///
    /// # Returns
    /// - `Ok(User)` - The created reader
    /// - `Err(AppError::DbErr)` - Insert failed, including unique email/mobile violations
    pub async fn create(&self, params: CreateUserParams) -> Result<User, AppError> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            full_name: ActiveValue::Set(params.full_name),
            email: ActiveValue::Set(params.email),
            mobile_number: ActiveValue::Set(params.mobile_number),
            password_hash: ActiveValue::Set(params.password_hash),
            user_type: ActiveValue::Set(params.user_type),
            profile_image: ActiveValue::Set(params.profile_image),
            social_providers: ActiveValue::Set(encode_json(
                "user.social_providers",
                &params.social_providers,
            )?),
            is_verified: ActiveValue::Set(params.is_verified),
            lifecycle: ActiveValue::Set(lifecycle::ACTIVE.to_string()),
            lifecycle_at: ActiveValue::Set(None),
            lifecycle_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a reader by id regardless of lifecycle.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Reader found
    /// - `Ok(None)` - No reader with that id
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds a reader by email, compared in lowercase.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds readers by id, skipping ids that do not exist.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    /// Checks whether the email or mobile number is already registered.
    ///
    /// # Arguments
    /// - `email` - Email to check, compared in lowercase
    /// - `mobile_number` - Mobile number to check; skipped when `None`
    ///
    /// # Returns
    /// - `Ok(true)` - Either value belongs to an existing account
    /// - `Ok(false)` - Both are free
    /// - `Err(AppError::DbErr)` - Database error during count
    pub async fn email_or_mobile_taken(
        &self,
        email: &str,
        mobile_number: Option<&str>,
    ) -> Result<bool, AppError> {
        let mut condition =
            Condition::any().add(entity::user::Column::Email.eq(email.to_lowercase()));
        if let Some(mobile) = mobile_number {
            condition = condition.add(entity::user::Column::MobileNumber.eq(mobile));
        }

        let count = entity::prelude::User::find()
            .filter(condition)
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether a reader other than `except_id` uses the mobile number.
    pub async fn mobile_taken_by_other(
        &self,
        mobile_number: &str,
        except_id: i32,
    ) -> Result<bool, AppError> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::MobileNumber.eq(mobile_number))
            .filter(entity::user::Column::Id.ne(except_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets readers that are not deleted with pagination, ordered by id.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of readers to return per page
    ///
    /// # Returns
    /// - `Ok((users, total))` - Readers for the requested page and the total reader count
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<User>, u64), AppError> {
        let paginator = entity::prelude::User::find()
            .filter(entity::user::Column::Lifecycle.ne(lifecycle::DELETED))
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    /// Applies the given profile changes.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated reader
    /// - `Ok(None)` - No reader with that id
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<Option<User>, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(full_name) = params.full_name {
            active.full_name = ActiveValue::Set(full_name);
        }
        if let Some(mobile_number) = params.mobile_number {
            active.mobile_number = ActiveValue::Set(Some(mobile_number));
        }
        if let Some(profile_image) = params.profile_image {
            active.profile_image = ActiveValue::Set(Some(profile_image));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        User::from_entity(entity).map(Some)
    }

    /// Moves the reader to the given lifecycle state.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated reader
    /// - `Ok(None)` - No reader with that id
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn set_lifecycle(&self, id: i32, lifecycle: Lifecycle) -> Result<Option<User>, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let (state, at, by) = lifecycle.into_columns();
        let mut active = entity.into_active_model();
        active.lifecycle = ActiveValue::Set(state);
        active.lifecycle_at = ActiveValue::Set(at);
        active.lifecycle_by = ActiveValue::Set(by);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        User::from_entity(entity).map(Some)
    }

    /// Replaces the reader's linked social providers and marks them verified.
    pub async fn set_social_providers(
        &self,
        id: i32,
        providers: &[SocialProvider],
    ) -> Result<Option<User>, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.social_providers =
            ActiveValue::Set(encode_json("user.social_providers", &providers)?);
        active.is_verified = ActiveValue::Set(true);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        User::from_entity(entity).map(Some)
    }

    /// Counts readers that are not deleted.
    pub async fn count_not_deleted(&self) -> Result<u64, AppError> {
        Ok(entity::prelude::User::find()
            .filter(entity::user::Column::Lifecycle.ne(lifecycle::DELETED))
            .count(self.db)
            .await?)
    }

    /// Ids of readers soft deleted before `cutoff`.
    pub async fn find_deleted_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<i32>, AppError> {
        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Lifecycle.eq(lifecycle::DELETED))
            .filter(entity::user::Column::LifecycleAt.lt(cutoff))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|e| e.id).collect())
    }

    /// Hard deletes the given readers.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    /// - `Err(AppError::DbErr)` - Database error during delete
    pub async fn delete_many(&self, ids: &[i32]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::User::delete_many()
            .filter(entity::user::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
