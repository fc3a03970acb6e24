//! Reader account service.
//!
//! Covers the reader's own profile as well as the admin-side user management:
//! paginated listing, profile edits and lifecycle transitions. Deleted readers are
//! invisible to every operation here and wait for the purge job.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{user::UserRepository, user_circle::UserCircleRepository},
    error::AppError,
    model::{
        lifecycle::Lifecycle,
        user::{PaginatedUsers, UpdateUserParams, User, UserProfile},
    },
};

pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_live(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|u| !u.lifecycle.is_deleted())
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    async fn with_memberships(&self, user: User) -> Result<UserProfile, AppError> {
        let memberships = UserCircleRepository::new(self.db)
            .memberships(user.id)
            .await?;

        Ok(UserProfile { user, memberships })
    }

    /// Retrieves a reader with their circle lists.
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - Reader found
    /// - `Err(AppError::NotFound)` - No such reader, or the reader is deleted
    pub async fn get_profile(&self, id: i32) -> Result<UserProfile, AppError> {
        let user = self.find_live(id).await?;

        self.with_memberships(user).await
    }

    /// Retrieves readers with pagination, deleted ones excluded.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Readers per page
    ///
    /// # Returns
    /// - `Ok(PaginatedUsers)` - Readers for the requested page with pagination metadata
    /// - `Err(AppError::DbErr)` - Database error during pagination query
    pub async fn get_all(&self, page: u64, per_page: u64) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(page, per_page)
            .await?;

        let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
        let mut memberships = UserCircleRepository::new(self.db)
            .memberships_for_many(&ids)
            .await?;

        let users = users
            .into_iter()
            .map(|user| UserProfile {
                memberships: memberships.remove(&user.id).unwrap_or_default(),
                user,
            })
            .collect();

        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Ok(PaginatedUsers {
            users,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Applies profile changes.
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - Updated reader
    /// - `Err(AppError::NotFound)` - No such reader, or the reader is deleted
    /// - `Err(AppError::Conflict)` - New mobile number belongs to another reader
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<UserProfile, AppError> {
        let user_repo = UserRepository::new(self.db);
        let user = self.find_live(id).await?;

        if let Some(mobile) = params.mobile_number.as_deref() {
            if user_repo.mobile_taken_by_other(mobile, user.id).await? {
                return Err(AppError::Conflict(
                    "A user with this mobile number already exists".to_string(),
                ));
            }
        }

        let user = user_repo
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        self.with_memberships(user).await
    }

    /// Soft deletes a reader. The row stays until the purge job removes it.
    ///
    /// # Arguments
    /// - `id` - Reader to delete
    /// - `actor` - Who performed the deletion (`"user:3"`, `"admin:1"`, ...)
    pub async fn delete(&self, id: i32, actor: String) -> Result<(), AppError> {
        self.transition(
            id,
            Lifecycle::Deleted {
                at: Utc::now(),
                by: actor,
            },
        )
        .await?;

        tracing::info!("Soft deleted user {}", id);

        Ok(())
    }

    pub async fn deactivate(&self, id: i32, actor: String) -> Result<UserProfile, AppError> {
        let user = self
            .transition(
                id,
                Lifecycle::Deactivated {
                    at: Utc::now(),
                    by: actor,
                },
            )
            .await?;

        self.with_memberships(user).await
    }

    pub async fn activate(&self, id: i32) -> Result<UserProfile, AppError> {
        let user = self.transition(id, Lifecycle::Active).await?;

        self.with_memberships(user).await
    }

    async fn transition(&self, id: i32, lifecycle: Lifecycle) -> Result<User, AppError> {
        self.find_live(id).await?;

        UserRepository::new(self.db)
            .set_lifecycle(id, lifecycle)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}
