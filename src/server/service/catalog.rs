//! External book catalog client.
//!
//! Volumes are fetched from a Google Books compatible endpoint and normalized into
//! `UpsertBookParams`. The catalog is only consulted when a local lookup misses;
//! `BookService` persists whatever it returns.

use crate::{
    model::book::{VolumeDto, VolumesDto},
    server::{error::AppError, model::book::UpsertBookParams},
};

/// Rating given to volumes the catalog has no rating for.
pub const DEFAULT_RATING: f64 = 0.5;

/// Source of catalog volumes.
pub trait CatalogProvider {
    /// Volumes carrying the ISBN.
    async fn by_isbn(&self, isbn: &str) -> Result<Vec<UpsertBookParams>, AppError>;

    /// Volumes matching free text.
    async fn search(&self, text: &str) -> Result<Vec<UpsertBookParams>, AppError>;
}

#[derive(Clone)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    /// Creates a catalog client.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `base_url` - Volumes endpoint, e.g. `https://www.googleapis.com/books/v1/volumes`
    /// - `api_key` - Optional API key appended as `key`
    pub fn new(http: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    async fn volumes(&self, query: &str) -> Result<Vec<UpsertBookParams>, AppError> {
        let mut params = vec![("q", query.to_string())];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        let page: VolumesDto = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let total = page.items.len();
        let books: Vec<UpsertBookParams> =
            page.items.into_iter().filter_map(normalize_volume).collect();

        tracing::debug!(
            "Catalog query '{}' returned {} volumes, {} usable",
            query,
            total,
            books.len()
        );

        Ok(books)
    }
}

impl CatalogProvider for GoogleBooksClient {
    async fn by_isbn(&self, isbn: &str) -> Result<Vec<UpsertBookParams>, AppError> {
        self.volumes(&format!("isbn:{}", isbn)).await
    }

    async fn search(&self, text: &str) -> Result<Vec<UpsertBookParams>, AppError> {
        self.volumes(text).await
    }
}

/// Normalizes a catalog volume into a book.
///
/// Volumes without a title or without any ISBN identifier cannot be deduplicated
/// and are skipped. The publication year is the leading year of `publishedDate`.
pub fn normalize_volume(volume: VolumeDto) -> Option<UpsertBookParams> {
    let info = volume.volume_info;

    let title = info.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;

    let mut isbns: Vec<String> = Vec::new();
    for identifier in info.industry_identifiers.unwrap_or_default() {
        let isbn = identifier.identifier.trim().to_string();
        if identifier.kind.starts_with("ISBN") && !isbn.is_empty() && !isbns.contains(&isbn) {
            isbns.push(isbn);
        }
    }
    if isbns.is_empty() {
        return None;
    }

    let publication_year = info
        .published_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok());

    Some(UpsertBookParams {
        isbns,
        title,
        authors: info.authors.unwrap_or_default(),
        publisher: info.publisher.unwrap_or_default(),
        publication_year,
        genres: info.categories.unwrap_or_default(),
        description: info.description.unwrap_or_default(),
        cover_image: info
            .image_links
            .and_then(|links| links.thumbnail)
            .unwrap_or_default(),
        languages: info.language.into_iter().collect(),
        rating: info.average_rating.unwrap_or(DEFAULT_RATING),
    })
}
