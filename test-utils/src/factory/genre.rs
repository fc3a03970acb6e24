//! Genre factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for genres. Defaults to a uniquely named `Fiction` genre.
pub struct GenreFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    name: String,
    category: String,
}

impl<'a, C: ConnectionTrait> GenreFactory<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            db,
            name: format!("Genre {}", next_id()),
            category: "Fiction".to_string(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the stored category label, e.g. `"Non-Fiction"`.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub async fn build(self) -> Result<entity::genre::Model, DbErr> {
        entity::genre::ActiveModel {
            name: ActiveValue::Set(self.name),
            category: ActiveValue::Set(self.category),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_genre<C: ConnectionTrait>(db: &C) -> Result<entity::genre::Model, DbErr> {
    GenreFactory::new(db).build().await
}
