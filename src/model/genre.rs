use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum GenreCategory {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Academic,
    Leisure,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGenreDto {
    #[validate(length(min = 1))]
    pub name: String,
    pub category: GenreCategory,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MoveGenreDto {
    pub category: GenreCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
    pub category: GenreCategory,
    pub created_at: DateTime<Utc>,
}
