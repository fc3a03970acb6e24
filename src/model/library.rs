use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ReadingStatus {
    ToRead,
    #[default]
    Reading,
    Completed,
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceDto {
    pub source_name: String,
    pub source_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDto {
    pub book_id: i32,
    pub position: i32,
    pub read_progress: u8,
    pub status: ReadingStatus,
    pub color: String,
    pub source: SourceDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShelfDto {
    pub shelf_id: i32,
    pub placements: Vec<PlacementDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LibraryDto {
    pub name: String,
    pub shelves: Vec<ShelfDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryRecordDto {
    pub user_id: i32,
    pub libraries: Vec<LibraryDto>,
    pub version: i32,
    pub updated_at: DateTime<Utc>,
}

/// A placement together with where it sits.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocatedPlacementDto {
    pub library_name: String,
    pub shelf_index: usize,
    pub shelf_id: i32,
    pub placement: PlacementDto,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBookDto {
    pub book_id: i32,
    #[validate(length(min = 1))]
    pub library_name: String,
    /// Zero based index into the library's shelves.
    pub shelf_index: i32,
    pub position: i32,
    #[serde(default)]
    pub read_progress: i32,
    pub status: Option<ReadingStatus>,
    pub source: Option<SourceDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressDto {
    pub read_progress: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStatusDto {
    pub status: ReadingStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecolorDto {
    #[validate(length(min = 1))]
    pub color: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLibraryDto {
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameLibraryDto {
    #[validate(length(min = 1))]
    pub new_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Consent {
    #[default]
    Conditional,
    Unconditional,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DeleteLibraryDto {
    #[serde(default)]
    pub consent: Consent,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveBooksDto {
    pub from: String,
    pub to: String,
    pub book_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovedBooksDto {
    /// Ids that were moved; empty when none were present in the source.
    pub moved: Vec<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RemoveFromLibraryQuery {
    /// Limit the removal to one library; every occurrence is removed when absent.
    pub library: Option<String>,
}
