//! Admin account management performed by the super admin.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::admin::AdminRepository,
    error::AppError,
    model::{
        admin::{Admin, UpdateAdminParams},
        lifecycle::Lifecycle,
    },
};

pub struct AdminService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    fn not_found(id: i32) -> AppError {
        AppError::NotFound(format!("Admin {} not found", id))
    }

    /// Every admin that is not deleted, ordered by id.
    pub async fn get_all(&self) -> Result<Vec<Admin>, AppError> {
        AdminRepository::new(self.db).get_all().await
    }

    pub async fn get(&self, id: i32) -> Result<Admin, AppError> {
        AdminRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|a| !a.lifecycle.is_deleted())
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn update(&self, id: i32, params: UpdateAdminParams) -> Result<Admin, AppError> {
        self.get(id).await?;

        AdminRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Marks an admin as verified so they can sign in.
    ///
    /// # Arguments
    /// - `id` - Admin to verify
    /// - `verified_by` - Super admin performing the verification
    ///
    /// # Returns
    /// - `Ok(Admin)` - The verified admin
    /// - `Err(AppError::NotFound)` - No such admin, or the admin is deleted
    /// - `Err(AppError::Conflict)` - Admin was already verified
    pub async fn verify(&self, id: i32, verified_by: i32) -> Result<Admin, AppError> {
        let admin = self.get(id).await?;
        if admin.is_verified {
            return Err(AppError::Conflict(format!("Admin {} is already verified", id)));
        }

        let admin = AdminRepository::new(self.db)
            .verify(id, verified_by)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        tracing::info!("Super admin {} verified admin {}", verified_by, id);

        Ok(admin)
    }

    /// Soft deletes an admin.
    pub async fn delete(&self, id: i32, actor: String) -> Result<(), AppError> {
        self.get(id).await?;

        AdminRepository::new(self.db)
            .set_lifecycle(
                id,
                Lifecycle::Deleted {
                    at: Utc::now(),
                    by: actor,
                },
            )
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        tracing::info!("Soft deleted admin {}", id);

        Ok(())
    }
}
