//! Catalog book repository.
//!
//! Books are stored in the `book` table with their ISBNs in `book_isbn`, one row per
//! ISBN with a unique constraint, so any ISBN identifies at most one book. Reads
//! attach the ISBN rows in a single follow-up query per batch of books.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        book::{Book, UpdateBookParams, UpsertBookParams},
        encode_json,
        lifecycle::{self, Lifecycle},
    },
};

pub struct BookRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Converts book rows into domain books with their ISBNs attached.
    async fn with_isbns(&self, entities: Vec<entity::book::Model>) -> Result<Vec<Book>, AppError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = entities.iter().map(|e| e.id).collect();
        let mut isbns: HashMap<i32, Vec<entity::book_isbn::Model>> = HashMap::new();
        for isbn in entity::prelude::BookIsbn::find()
            .filter(entity::book_isbn::Column::BookId.is_in(ids))
            .all(self.db)
            .await?
        {
            isbns.entry(isbn.book_id).or_default().push(isbn);
        }

        entities
            .into_iter()
            .map(|e| {
                let rows = isbns.remove(&e.id).unwrap_or_default();
                Book::from_entity(e, rows)
            })
            .collect()
    }

    async fn with_isbns_one(
        &self,
        entity: Option<entity::book::Model>,
    ) -> Result<Option<Book>, AppError> {
        match entity {
            Some(entity) => Ok(self.with_isbns(vec![entity]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Inserts a book and its ISBN rows.
    ///
    /// Should run inside a transaction so a failing ISBN insert leaves no orphan book.
    pub async fn create(&self, params: UpsertBookParams) -> Result<Book, AppError> {
        let now = Utc::now();
        let entity = entity::book::ActiveModel {
            title: ActiveValue::Set(params.title),
            authors: ActiveValue::Set(encode_json("book.authors", &params.authors)?),
            publisher: ActiveValue::Set(params.publisher),
            publication_year: ActiveValue::Set(params.publication_year),
            genres: ActiveValue::Set(encode_json("book.genres", &params.genres)?),
            description: ActiveValue::Set(params.description),
            cover_image: ActiveValue::Set(params.cover_image),
            languages: ActiveValue::Set(encode_json("book.languages", &params.languages)?),
            rating: ActiveValue::Set(params.rating),
            lifecycle: ActiveValue::Set(lifecycle::ACTIVE.to_string()),
            lifecycle_at: ActiveValue::Set(None),
            lifecycle_by: ActiveValue::Set(None),
            added_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.add_isbns(entity.id, &params.isbns).await?;

        self.with_isbns(vec![entity])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("Book vanished after insert".to_string()))
    }

    /// Overwrites a book's catalog fields with freshly imported data and adds any
    /// ISBNs it did not have yet. The lifecycle is left as it was.
    pub async fn merge(&self, id: i32, params: UpsertBookParams) -> Result<Option<Book>, AppError> {
        let Some(entity) = entity::prelude::Book::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.title = ActiveValue::Set(params.title);
        active.authors = ActiveValue::Set(encode_json("book.authors", &params.authors)?);
        active.publisher = ActiveValue::Set(params.publisher);
        active.publication_year = ActiveValue::Set(params.publication_year);
        active.genres = ActiveValue::Set(encode_json("book.genres", &params.genres)?);
        active.description = ActiveValue::Set(params.description);
        active.cover_image = ActiveValue::Set(params.cover_image);
        active.languages = ActiveValue::Set(encode_json("book.languages", &params.languages)?);
        active.rating = ActiveValue::Set(params.rating);
        active.updated_at = ActiveValue::Set(Utc::now());
        let entity = active.update(self.db).await?;

        let existing: Vec<String> = entity::prelude::BookIsbn::find()
            .filter(entity::book_isbn::Column::BookId.eq(id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|i| i.isbn)
            .collect();
        let missing: Vec<String> = params
            .isbns
            .into_iter()
            .filter(|isbn| !existing.contains(isbn))
            .collect();
        self.add_isbns(id, &missing).await?;

        self.with_isbns_one(Some(entity)).await
    }

    async fn add_isbns(&self, book_id: i32, isbns: &[String]) -> Result<(), AppError> {
        if isbns.is_empty() {
            return Ok(());
        }

        entity::prelude::BookIsbn::insert_many(isbns.iter().map(|isbn| {
            entity::book_isbn::ActiveModel {
                book_id: ActiveValue::Set(book_id),
                isbn: ActiveValue::Set(isbn.clone()),
                ..Default::default()
            }
        }))
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// Finds a book by id regardless of lifecycle.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Book>, AppError> {
        let entity = entity::prelude::Book::find_by_id(id).one(self.db).await?;

        self.with_isbns_one(entity).await
    }

    /// Id of the book owning any of the given ISBNs, regardless of lifecycle.
    pub async fn find_id_by_any_isbn(&self, isbns: &[String]) -> Result<Option<i32>, AppError> {
        if isbns.is_empty() {
            return Ok(None);
        }

        let row = entity::prelude::BookIsbn::find()
            .filter(entity::book_isbn::Column::Isbn.is_in(isbns.iter().cloned()))
            .order_by_asc(entity::book_isbn::Column::Id)
            .one(self.db)
            .await?;

        Ok(row.map(|r| r.book_id))
    }

    /// Finds an active book by one of its ISBNs.
    pub async fn find_active_by_isbn(&self, isbn: &str) -> Result<Option<Book>, AppError> {
        let Some(id) = self.find_id_by_any_isbn(&[isbn.to_string()]).await? else {
            return Ok(None);
        };

        Ok(self
            .find_by_id(id)
            .await?
            .filter(|book| book.lifecycle.is_active()))
    }

    /// Active books with the given ids, in ascending id order.
    pub async fn find_active_by_ids(&self, ids: &[i32]) -> Result<Vec<Book>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Book::find()
            .filter(entity::book::Column::Id.is_in(ids.iter().copied()))
            .filter(entity::book::Column::Lifecycle.eq(lifecycle::ACTIVE))
            .order_by_asc(entity::book::Column::Id)
            .all(self.db)
            .await?;

        self.with_isbns(entities).await
    }

    /// Every active book, newest first.
    pub async fn get_all_active(&self) -> Result<Vec<Book>, AppError> {
        let entities = entity::prelude::Book::find()
            .filter(entity::book::Column::Lifecycle.eq(lifecycle::ACTIVE))
            .order_by_desc(entity::book::Column::AddedAt)
            .order_by_desc(entity::book::Column::Id)
            .all(self.db)
            .await?;

        self.with_isbns(entities).await
    }

    /// Active books whose title or author list contains the text.
    ///
    /// Matching is done by the database's `LIKE`, which is case-insensitive for ASCII
    /// under SQLite.
    pub async fn search(&self, text: &str) -> Result<Vec<Book>, AppError> {
        let pattern = format!("%{}%", text);
        let entities = entity::prelude::Book::find()
            .filter(entity::book::Column::Lifecycle.eq(lifecycle::ACTIVE))
            .filter(
                Condition::any()
                    .add(entity::book::Column::Title.like(pattern.as_str()))
                    .add(entity::book::Column::Authors.like(pattern.as_str())),
            )
            .order_by_asc(entity::book::Column::Title)
            .all(self.db)
            .await?;

        self.with_isbns(entities).await
    }

    /// Active books whose genre list mentions the genre, matched exactly afterwards.
    pub async fn find_by_genre(&self, genre: &str) -> Result<Vec<Book>, AppError> {
        let entities = entity::prelude::Book::find()
            .filter(entity::book::Column::Lifecycle.eq(lifecycle::ACTIVE))
            .filter(entity::book::Column::Genres.like(format!("%\"{}\"%", genre)))
            .order_by_asc(entity::book::Column::Title)
            .all(self.db)
            .await?;

        Ok(self
            .with_isbns(entities)
            .await?
            .into_iter()
            .filter(|b| b.has_genre(genre))
            .collect())
    }

    /// Active books whose author list mentions the author, matched exactly afterwards.
    pub async fn find_by_author(&self, author: &str) -> Result<Vec<Book>, AppError> {
        let entities = entity::prelude::Book::find()
            .filter(entity::book::Column::Lifecycle.eq(lifecycle::ACTIVE))
            .filter(entity::book::Column::Authors.like(format!("%\"{}\"%", author)))
            .order_by_asc(entity::book::Column::Title)
            .all(self.db)
            .await?;

        Ok(self
            .with_isbns(entities)
            .await?
            .into_iter()
            .filter(|b| b.has_author(author))
            .collect())
    }

    /// Gets active books with pagination, ordered by id.
    ///
    /// # Returns
    /// - `Ok((books, total))` - Books for the requested page and the total active count
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Book>, u64), AppError> {
        let paginator = entity::prelude::Book::find()
            .filter(entity::book::Column::Lifecycle.eq(lifecycle::ACTIVE))
            .order_by_asc(entity::book::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.with_isbns(entities).await?, total))
    }

    /// Applies the given master record changes.
    pub async fn update(&self, id: i32, params: UpdateBookParams) -> Result<Option<Book>, AppError> {
        let Some(entity) = entity::prelude::Book::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(authors) = params.authors {
            active.authors = ActiveValue::Set(encode_json("book.authors", &authors)?);
        }
        if let Some(publisher) = params.publisher {
            active.publisher = ActiveValue::Set(publisher);
        }
        if let Some(year) = params.publication_year {
            active.publication_year = ActiveValue::Set(Some(year));
        }
        if let Some(genres) = params.genres {
            active.genres = ActiveValue::Set(encode_json("book.genres", &genres)?);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(cover_image) = params.cover_image {
            active.cover_image = ActiveValue::Set(cover_image);
        }
        if let Some(languages) = params.languages {
            active.languages = ActiveValue::Set(encode_json("book.languages", &languages)?);
        }
        if let Some(rating) = params.rating {
            active.rating = ActiveValue::Set(rating);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        self.with_isbns_one(Some(entity)).await
    }

    pub async fn set_lifecycle(&self, id: i32, lifecycle: Lifecycle) -> Result<Option<Book>, AppError> {
        let Some(entity) = entity::prelude::Book::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let (state, at, by) = lifecycle.into_columns();
        let mut active = entity.into_active_model();
        active.lifecycle = ActiveValue::Set(state);
        active.lifecycle_at = ActiveValue::Set(at);
        active.lifecycle_by = ActiveValue::Set(by);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        self.with_isbns_one(Some(entity)).await
    }

    pub async fn count_active(&self) -> Result<u64, AppError> {
        Ok(entity::prelude::Book::find()
            .filter(entity::book::Column::Lifecycle.eq(lifecycle::ACTIVE))
            .count(self.db)
            .await?)
    }

    /// Counts active books added at or after `since`.
    pub async fn count_added_since(&self, since: DateTime<Utc>) -> Result<u64, AppError> {
        Ok(entity::prelude::Book::find()
            .filter(entity::book::Column::Lifecycle.eq(lifecycle::ACTIVE))
            .filter(entity::book::Column::AddedAt.gte(since))
            .count(self.db)
            .await?)
    }
}
