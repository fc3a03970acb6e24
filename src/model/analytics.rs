use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::book::BookDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummaryDto {
    pub total_books: u64,
    pub total_users: u64,
    pub total_genres: u64,
    pub added_last_7_days: u64,
    pub added_last_30_days: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenreShareDto {
    pub genre: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MostPlacedDto {
    pub book: BookDto,
    /// Number of placements across every reader's libraries.
    pub placements: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountDto {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingBreakdownDto {
    pub by_source_type: Vec<CountDto>,
    pub by_category: Vec<CountDto>,
    pub fiction_percentage: f64,
    pub non_fiction_percentage: f64,
    pub academic_percentage: f64,
    pub leisure_percentage: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MostPlacedQuery {
    pub limit: Option<usize>,
}
