use sea_orm::DatabaseConnection;

use crate::{
    model::genre::GenreCategory,
    server::{data::genre::GenreRepository, error::AppError, model::genre::Genre},
};

pub struct GenreService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> GenreService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a genre.
    ///
    /// # Returns
    /// - `Ok(Genre)` - The new genre
    /// - `Err(AppError::Conflict)` - A genre with this name exists
    pub async fn create(&self, name: String, category: GenreCategory) -> Result<Genre, AppError> {
        let repo = GenreRepository::new(self.db);
        let name = name.trim().to_string();

        if repo.find_by_name(&name).await?.is_some() {
            return Err(AppError::Conflict(format!("Genre '{}' already exists", name)));
        }

        repo.create(name, category).await
    }

    pub async fn get_all(&self) -> Result<Vec<Genre>, AppError> {
        GenreRepository::new(self.db).get_all().await
    }

    /// Moves a genre to another category.
    pub async fn move_to(&self, id: i32, category: GenreCategory) -> Result<Genre, AppError> {
        GenreRepository::new(self.db)
            .set_category(id, category)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !GenreRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Genre {} not found", id)));
        }

        Ok(())
    }
}
