use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Body returned when deleting a library would orphan books.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequiredDto {
    pub error: String,
    /// Books held only by the library being deleted.
    pub orphaned_books: Vec<i32>,
}

/// Payload for endpoints that only need the caller's token.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NoPayload {}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}
