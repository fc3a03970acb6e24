//! Genre repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::genre::GenreCategory,
    server::{error::AppError, model::genre::Genre},
};

pub struct GenreRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GenreRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String, category: GenreCategory) -> Result<Genre, AppError> {
        let entity = entity::genre::ActiveModel {
            name: ActiveValue::Set(name),
            category: ActiveValue::Set(category.label().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Genre::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, AppError> {
        entity::prelude::Genre::find_by_id(id)
            .one(self.db)
            .await?
            .map(Genre::from_entity)
            .transpose()
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, AppError> {
        entity::prelude::Genre::find()
            .filter(entity::genre::Column::Name.eq(name))
            .one(self.db)
            .await?
            .map(Genre::from_entity)
            .transpose()
    }

    /// Gets every genre ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Genre>, AppError> {
        entity::prelude::Genre::find()
            .order_by_asc(entity::genre::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(Genre::from_entity)
            .collect()
    }

    /// Moves a genre to another category.
    ///
    /// # Returns
    /// - `Ok(Some(Genre))` - Updated genre
    /// - `Ok(None)` - No genre with that id
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn set_category(
        &self,
        id: i32,
        category: GenreCategory,
    ) -> Result<Option<Genre>, AppError> {
        let Some(entity) = entity::prelude::Genre::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.category = ActiveValue::Set(category.label().to_string());

        Genre::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Deletes a genre.
    ///
    /// # Returns
    /// - `Ok(true)` - Genre removed
    /// - `Ok(false)` - No genre with that id
    /// - `Err(AppError::DbErr)` - Database error during delete
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Genre::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(entity::prelude::Genre::find().count(self.db).await?)
    }
}
