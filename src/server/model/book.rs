//! Catalog book domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::book::{BookDto, FilterQuery, PaginatedBooksDto, UpdateBookDto},
    server::{
        error::AppError,
        model::{decode_json, lifecycle::Lifecycle},
    },
};

/// Canonical catalog entry, identified externally by any of its ISBNs.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i32,
    pub isbns: Vec<String>,
    pub title: String,
    pub authors: Vec<String>,
    pub publisher: String,
    pub publication_year: Option<i32>,
    pub genres: Vec<String>,
    pub description: String,
    pub cover_image: String,
    pub languages: Vec<String>,
    pub rating: f64,
    pub lifecycle: Lifecycle,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Converts a book row and its ISBN rows into the domain model.
    ///
    /// # Returns
    /// - `Ok(Book)` - Converted book with ISBNs in insertion order
    /// - `Err(AppError::InternalErr)` - A JSON list column or the lifecycle is unreadable
    pub fn from_entity(
        entity: entity::book::Model,
        isbns: Vec<entity::book_isbn::Model>,
    ) -> Result<Self, AppError> {
        let mut isbns = isbns;
        isbns.sort_by_key(|i| i.id);

        Ok(Self {
            id: entity.id,
            isbns: isbns.into_iter().map(|i| i.isbn).collect(),
            title: entity.title,
            authors: decode_json("book.authors", entity.authors)?,
            publisher: entity.publisher,
            publication_year: entity.publication_year,
            genres: decode_json("book.genres", entity.genres)?,
            description: entity.description,
            cover_image: entity.cover_image,
            languages: decode_json("book.languages", entity.languages)?,
            rating: entity.rating,
            lifecycle: Lifecycle::from_columns(
                "book.lifecycle",
                &entity.lifecycle,
                entity.lifecycle_at,
                entity.lifecycle_by,
            )?,
            added_at: entity.added_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }

    pub fn has_author(&self, author: &str) -> bool {
        self.authors.iter().any(|a| a.eq_ignore_ascii_case(author))
    }

    /// True when the two books share at least one genre or author.
    pub fn is_similar_to(&self, other: &Book) -> bool {
        self.id != other.id
            && (self.genres.iter().any(|g| other.has_genre(g))
                || self.authors.iter().any(|a| other.has_author(a)))
    }

    pub fn into_dto(self) -> BookDto {
        BookDto {
            id: self.id,
            isbns: self.isbns,
            title: self.title,
            authors: self.authors,
            publisher: self.publisher,
            publication_year: self.publication_year,
            genres: self.genres,
            description: self.description,
            cover_image: self.cover_image,
            languages: self.languages,
            rating: self.rating,
            added_at: self.added_at,
            updated_at: self.updated_at,
        }
    }
}

/// A normalized catalog volume ready to be inserted or merged by ISBN.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertBookParams {
    pub isbns: Vec<String>,
    pub title: String,
    pub authors: Vec<String>,
    pub publisher: String,
    pub publication_year: Option<i32>,
    pub genres: Vec<String>,
    pub description: String,
    pub cover_image: String,
    pub languages: Vec<String>,
    pub rating: f64,
}

/// Master record fields an admin may change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookParams {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub languages: Option<Vec<String>>,
    pub rating: Option<f64>,
}

impl UpdateBookParams {
    pub fn from_dto(dto: UpdateBookDto) -> Self {
        Self {
            title: dto.title,
            authors: dto.authors,
            publisher: dto.publisher,
            publication_year: dto.publication_year,
            genres: dto.genres,
            description: dto.description,
            cover_image: dto.cover_image,
            languages: dto.languages,
            rating: dto.rating,
        }
    }
}

pub const DEFAULT_FILTER_LIMIT: u64 = 10;

/// Criteria for the filtered book listing.
#[derive(Debug, Clone, PartialEq)]
pub struct BookFilter {
    /// Matches books having any of these genres, compared case-insensitively.
    pub genres: Vec<String>,
    pub min_rating: Option<f64>,
    pub limit: u64,
}

impl BookFilter {
    pub fn from_query(query: FilterQuery) -> Self {
        let genres = query
            .genre
            .map(|g| {
                g.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            genres,
            min_rating: query.rating,
            limit: query.limit.unwrap_or(DEFAULT_FILTER_LIMIT),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let genre_ok = self.genres.is_empty() || self.genres.iter().any(|g| book.has_genre(g));
        let rating_ok = self.min_rating.is_none_or(|min| book.rating >= min);
        genre_ok && rating_ok
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedBooks {
    pub books: Vec<Book>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedBooks {
    pub fn into_dto(self) -> PaginatedBooksDto {
        PaginatedBooksDto {
            books: self.books.into_iter().map(Book::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
