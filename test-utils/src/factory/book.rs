//! Book factory for creating catalog entries with their ISBNs.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for creating test books.
///
/// Every book gets at least one ISBN row; call `isbn` to add specific ones,
/// otherwise a unique 13 digit value is generated.
///
/// # Example
///
/// ```rust,ignore
/// let book = BookFactory::new(&db)
///     .title("Aranyak")
///     .authors(["Bibhutibhushan Bandyopadhyay"])
///     .genres(["Fiction"])
///     .rating(4.5)
///     .build()
///     .await?;
/// ```
pub struct BookFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    title: String,
    authors: Vec<String>,
    genres: Vec<String>,
    isbns: Vec<String>,
    rating: f64,
    added_at: DateTime<Utc>,
    deleted: bool,
}

impl<'a, C: ConnectionTrait> BookFactory<'a, C> {
    pub fn new(db: &'a C) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Book {}", id),
            authors: vec![format!("Author {}", id)],
            genres: Vec::new(),
            isbns: Vec::new(),
            rating: 3.0,
            added_at: Utc::now(),
            deleted: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an ISBN to the book. May be called more than once.
    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbns.push(isbn.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Backdates when the book entered the catalog.
    pub fn added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = added_at;
        self
    }

    /// Creates the book already soft deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    pub async fn build(mut self) -> Result<entity::book::Model, DbErr> {
        if self.isbns.is_empty() {
            self.isbns
                .push(format!("978{:010}", 1_000_000_000u64 + next_id()));
        }

        let book = entity::book::ActiveModel {
            title: ActiveValue::Set(self.title),
            authors: ActiveValue::Set(serde_json::json!(self.authors)),
            publisher: ActiveValue::Set("Signet Press".to_string()),
            publication_year: ActiveValue::Set(Some(1929)),
            genres: ActiveValue::Set(serde_json::json!(self.genres)),
            description: ActiveValue::Set(String::new()),
            cover_image: ActiveValue::Set(String::new()),
            languages: ActiveValue::Set(serde_json::json!(["bn"])),
            rating: ActiveValue::Set(self.rating),
            lifecycle: ActiveValue::Set(if self.deleted { "deleted" } else { "active" }.to_string()),
            lifecycle_at: ActiveValue::Set(self.deleted.then(Utc::now)),
            lifecycle_by: ActiveValue::Set(self.deleted.then(|| "admin:1".to_string())),
            added_at: ActiveValue::Set(self.added_at),
            updated_at: ActiveValue::Set(self.added_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for isbn in self.isbns {
            entity::book_isbn::ActiveModel {
                book_id: ActiveValue::Set(book.id),
                isbn: ActiveValue::Set(isbn),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(book)
    }
}

/// Creates a book with a generated title, author and ISBN.
pub async fn create_book<C: ConnectionTrait>(db: &C) -> Result<entity::book::Model, DbErr> {
    BookFactory::new(db).build().await
}
