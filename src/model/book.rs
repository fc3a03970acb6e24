use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
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
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedBooksDto {
    pub books: Vec<BookDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub languages: Option<Vec<String>>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

/// A page of volumes in the external catalog's shape.
///
/// Used both as the admin import body and to decode catalog API responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VolumesDto {
    #[serde(default)]
    pub items: Vec<VolumeDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDto {
    #[serde(default)]
    pub volume_info: VolumeInfoDto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfoDto {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub industry_identifiers: Option<Vec<IndustryIdentifierDto>>,
    pub categories: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub image_links: Option<ImageLinksDto>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndustryIdentifierDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinksDto {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Comma separated genre names.
    pub genre: Option<String>,
    pub rating: Option<f64>,
    pub limit: Option<u64>,
}
