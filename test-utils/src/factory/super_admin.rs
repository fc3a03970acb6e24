//! Super admin factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

pub struct SuperAdminFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    email: String,
    password_hash: String,
    is_active: bool,
}

impl<'a, C: ConnectionTrait> SuperAdminFactory<'a, C> {
    pub fn new(db: &'a C) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("root{}@example.com", id),
            password_hash: "unusable-hash".to_string(),
            is_active: true,
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

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub async fn build(self) -> Result<entity::super_admin::Model, DbErr> {
        let now = Utc::now();
        entity::super_admin::ActiveModel {
            full_name: ActiveValue::Set("Super Admin".to_string()),
            email: ActiveValue::Set(self.email),
            mobile_number: ActiveValue::Set("9000000000".to_string()),
            password_hash: ActiveValue::Set(self.password_hash),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_super_admin<C: ConnectionTrait>(
    db: &C,
) -> Result<entity::super_admin::Model, DbErr> {
    SuperAdminFactory::new(db).build().await
}
