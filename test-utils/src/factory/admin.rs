//! Admin factory for creating test admin accounts.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for creating test admins with customizable fields.
///
/// Admins are created verified and active unless told otherwise, since most
/// tests exercise an admin who is already allowed to log in.
pub struct AdminFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    full_name: String,
    email: String,
    password_hash: String,
    is_verified: bool,
    verified_by: Option<i32>,
    lifecycle: String,
    lifecycle_at: Option<DateTime<Utc>>,
}

impl<'a, C: ConnectionTrait> AdminFactory<'a, C> {
    pub fn new(db: &'a C) -> Self {
        let id = next_id();
        Self {
            db,
            full_name: format!("Admin {}", id),
            email: format!("admin{}@example.com", id),
            password_hash: "unusable-hash".to_string(),
            is_verified: true,
            verified_by: Some(1),
            lifecycle: "active".to_string(),
            lifecycle_at: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }

    /// Sets whether a super admin has verified this admin.
    pub fn verified(mut self, verified: bool) -> Self {
        self.is_verified = verified;
        self.verified_by = verified.then_some(1);
        self
    }

    /// Marks the admin soft deleted at the given time.
    pub fn deleted_at(mut self, at: DateTime<Utc>) -> Self {
        self.lifecycle = "deleted".to_string();
        self.lifecycle_at = Some(at);
        self
    }

    pub async fn build(self) -> Result<entity::admin::Model, DbErr> {
        let now = Utc::now();
        entity::admin::ActiveModel {
            full_name: ActiveValue::Set(self.full_name),
            email: ActiveValue::Set(self.email),
            mobile_number: ActiveValue::Set("9876543210".to_string()),
            password_hash: ActiveValue::Set(self.password_hash),
            is_verified: ActiveValue::Set(self.is_verified),
            verified_by: ActiveValue::Set(self.verified_by),
            lifecycle: ActiveValue::Set(self.lifecycle.clone()),
            lifecycle_at: ActiveValue::Set(self.lifecycle_at),
            lifecycle_by: ActiveValue::Set(self.lifecycle_at.map(|_| "superadmin:1".to_string())),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a verified, active admin.
pub async fn create_admin<C: ConnectionTrait>(db: &C) -> Result<entity::admin::Model, DbErr> {
    AdminFactory::new(db).build().await
}
