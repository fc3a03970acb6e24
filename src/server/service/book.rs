//! Catalog book service.
//!
//! Books are deduplicated by ISBN: importing a volume that shares any ISBN with a
//! stored book refreshes that book instead of adding a new one. ISBN lookups and
//! free text searches fall back to the external catalog on a local miss and keep
//! what it returns (cache-aside).

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::book::VolumesDto,
    server::{
        data::book::BookRepository,
        error::AppError,
        model::{
            book::{Book, BookFilter, PaginatedBooks, UpdateBookParams, UpsertBookParams},
            lifecycle::Lifecycle,
        },
        service::catalog::{normalize_volume, CatalogProvider},
    },
};

pub struct BookService<'a, P: CatalogProvider> {
    pub db: &'a DatabaseConnection,
    pub catalog: &'a P,
}

impl<'a, P: CatalogProvider> BookService<'a, P> {
    pub fn new(db: &'a DatabaseConnection, catalog: &'a P) -> Self {
        Self { db, catalog }
    }

    fn not_found(id: i32) -> AppError {
        AppError::NotFound(format!("Book {} not found", id))
    }

    /// Inserts or refreshes books by ISBN in one transaction.
    ///
    /// # Returns
    /// - `Ok(Vec<Book>)` - Stored books in input order
    /// - `Err(AppError)` - Database error; nothing is written
    async fn upsert_many(&self, books: Vec<UpsertBookParams>) -> Result<Vec<Book>, AppError> {
        let txn = self.db.begin().await?;
        let repo = BookRepository::new(&txn);

        let mut stored = Vec::with_capacity(books.len());
        for params in books {
            let book = match repo.find_id_by_any_isbn(&params.isbns).await? {
                Some(id) => repo.merge(id, params).await?.ok_or_else(|| Self::not_found(id))?,
                None => repo.create(params).await?,
            };
            stored.push(book);
        }

        txn.commit().await?;

        Ok(stored)
    }

    /// Imports a page of volumes in the external catalog's shape.
    ///
    /// # Returns
    /// - `Ok(Vec<Book>)` - Created or refreshed books
    /// - `Err(AppError::BadRequest)` - No volume had a title and an ISBN
    pub async fn import(&self, volumes: VolumesDto) -> Result<Vec<Book>, AppError> {
        let books: Vec<UpsertBookParams> = volumes
            .items
            .into_iter()
            .filter_map(normalize_volume)
            .collect();

        if books.is_empty() {
            return Err(AppError::BadRequest(
                "No importable books in request".to_string(),
            ));
        }

        let stored = self.upsert_many(books).await?;
        tracing::info!("Imported {} books", stored.len());

        Ok(stored)
    }

    /// An active book by id.
    pub async fn get_by_id(&self, id: i32) -> Result<Book, AppError> {
        BookRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|b| b.lifecycle.is_active())
            .ok_or_else(|| Self::not_found(id))
    }

    /// An active book by ISBN, fetched from the external catalog on a local miss.
    ///
    /// # Returns
    /// - `Ok(Book)` - Book found locally or imported from the catalog
    /// - `Err(AppError::NotFound)` - Neither source knows the ISBN, or the book is deleted
    /// - `Err(AppError::ReqwestErr)` - Catalog request failed
    pub async fn get_by_isbn(&self, isbn: &str) -> Result<Book, AppError> {
        let repo = BookRepository::new(self.db);
        if let Some(book) = repo.find_active_by_isbn(isbn).await? {
            return Ok(book);
        }

        let fetched = self.catalog.by_isbn(isbn).await?;
        if !fetched.is_empty() {
            self.upsert_many(fetched).await?;
        }

        repo.find_active_by_isbn(isbn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No book with ISBN {}", isbn)))
    }

    /// Searches titles and authors, falling back to the external catalog.
    ///
    /// An empty result from both sources is an empty list.
    pub async fn search(&self, text: &str) -> Result<Vec<Book>, AppError> {
        let local = BookRepository::new(self.db).search(text).await?;
        if !local.is_empty() {
            return Ok(local);
        }

        let fetched = self.catalog.search(text).await?;
        if fetched.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .upsert_many(fetched)
            .await?
            .into_iter()
            .filter(|b| b.lifecycle.is_active())
            .collect())
    }

    pub async fn by_genre(&self, genre: &str) -> Result<Vec<Book>, AppError> {
        let books = BookRepository::new(self.db).find_by_genre(genre).await?;
        if books.is_empty() {
            return Err(AppError::NotFound(format!("No books in genre '{}'", genre)));
        }

        Ok(books)
    }

    pub async fn by_author(&self, author: &str) -> Result<Vec<Book>, AppError> {
        let books = BookRepository::new(self.db).find_by_author(author).await?;
        if books.is_empty() {
            return Err(AppError::NotFound(format!("No books by '{}'", author)));
        }

        Ok(books)
    }

    /// Active books sharing a genre or an author with the given book.
    pub async fn similar(&self, id: i32) -> Result<Vec<Book>, AppError> {
        let book = self.get_by_id(id).await?;

        let similar: Vec<Book> = BookRepository::new(self.db)
            .get_all_active()
            .await?
            .into_iter()
            .filter(|other| book.is_similar_to(other))
            .collect();

        if similar.is_empty() {
            return Err(AppError::NotFound(format!("No books similar to {}", id)));
        }

        Ok(similar)
    }

    /// Newest active books matching the filter, up to its limit.
    pub async fn filtered(&self, filter: BookFilter) -> Result<Vec<Book>, AppError> {
        let limit = usize::try_from(filter.limit).unwrap_or(usize::MAX);
        let books: Vec<Book> = BookRepository::new(self.db)
            .get_all_active()
            .await?
            .into_iter()
            .filter(|b| filter.matches(b))
            .take(limit)
            .collect();

        if books.is_empty() {
            return Err(AppError::NotFound(
                "No books match the given filters".to_string(),
            ));
        }

        Ok(books)
    }

    pub async fn get_paginated(&self, page: u64, per_page: u64) -> Result<PaginatedBooks, AppError> {
        let (books, total) = BookRepository::new(self.db)
            .get_all_paginated(page, per_page)
            .await?;

        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Ok(PaginatedBooks {
            books,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Changes the master record of an active book.
    pub async fn update(&self, id: i32, params: UpdateBookParams) -> Result<Book, AppError> {
        self.get_by_id(id).await?;

        BookRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Soft deletes a book. Placements referring to it are left in place.
    pub async fn delete(&self, id: i32, actor: String) -> Result<(), AppError> {
        self.get_by_id(id).await?;

        BookRepository::new(self.db)
            .set_lifecycle(
                id,
                Lifecycle::Deleted {
                    at: Utc::now(),
                    by: actor,
                },
            )
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        tracing::info!("Soft deleted book {}", id);

        Ok(())
    }
}
