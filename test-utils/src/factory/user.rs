//! User factory for creating test reader accounts.
//!
//! This module provides factory methods for creating user entities with sensible
//! defaults, reducing boilerplate in tests. The factory supports customization
//! through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .full_name("Apu")
///     .email("apu@example.com")
///     .verified(true)
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    full_name: String,
    email: String,
    mobile_number: Option<String>,
    password_hash: Option<String>,
    user_type: String,
    social_providers: serde_json::Value,
    is_verified: bool,
    lifecycle: String,
    lifecycle_at: Option<DateTime<Utc>>,
    lifecycle_by: Option<String>,
}

impl<'a, C: ConnectionTrait> UserFactory<'a, C> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - full_name: `"Reader {id}"`
    /// - email: `"reader{id}@example.com"`
    /// - mobile_number: ten digit number derived from the id
    /// - password_hash: `None`
    /// - user_type: `"reader"`
    /// - lifecycle: active
    pub fn new(db: &'a C) -> Self {
        let id = next_id();
        Self {
            db,
            full_name: format!("Reader {}", id),
            email: format!("reader{}@example.com", id),
            mobile_number: Some(format!("{:010}", 9_000_000_000u64 + id)),
            password_hash: None,
            user_type: "reader".to_string(),
            social_providers: serde_json::json!([]),
            is_verified: false,
            lifecycle: "active".to_string(),
            lifecycle_at: None,
            lifecycle_by: None,
        }
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn mobile_number(mut self, mobile_number: Option<String>) -> Self {
        self.mobile_number = mobile_number;
        self
    }

    /// Sets the stored bcrypt hash used for password login.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Sets the raw social provider links stored as JSON.
    pub fn social_providers(mut self, providers: serde_json::Value) -> Self {
        self.social_providers = providers;
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.is_verified = verified;
        self
    }

    /// Marks the account deactivated at the given time.
    pub fn deactivated_at(mut self, at: DateTime<Utc>) -> Self {
        self.lifecycle = "deactivated".to_string();
        self.lifecycle_at = Some(at);
        self.lifecycle_by = Some("admin:1".to_string());
        self
    }

    /// Marks the account soft deleted at the given time.
    pub fn deleted_at(mut self, at: DateTime<Utc>) -> Self {
        self.lifecycle = "deleted".to_string();
        self.lifecycle_at = Some(at);
        self.lifecycle_by = Some("admin:1".to_string());
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            full_name: ActiveValue::Set(self.full_name),
            email: ActiveValue::Set(self.email),
            mobile_number: ActiveValue::Set(self.mobile_number),
            password_hash: ActiveValue::Set(self.password_hash),
            user_type: ActiveValue::Set(self.user_type),
            profile_image: ActiveValue::Set(None),
            social_providers: ActiveValue::Set(self.social_providers),
            is_verified: ActiveValue::Set(self.is_verified),
            lifecycle: ActiveValue::Set(self.lifecycle),
            lifecycle_at: ActiveValue::Set(self.lifecycle_at),
            lifecycle_by: ActiveValue::Set(self.lifecycle_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user<C: ConnectionTrait>(db: &C) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert!(!user.email.is_empty());
        assert_eq!(user.lifecycle, "active");
        assert!(user.password_hash.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_users() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user1 = create_user(db).await?;
        let user2 = create_user(db).await?;

        assert_ne!(user1.email, user2.email);
        assert_ne!(user1.mobile_number, user2.mobile_number);

        Ok(())
    }

    #[tokio::test]
    async fn creates_deleted_user() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let at = Utc::now();
        let user = UserFactory::new(db).deleted_at(at).build().await?;

        assert_eq!(user.lifecycle, "deleted");
        assert!(user.lifecycle_at.is_some());

        Ok(())
    }
}
