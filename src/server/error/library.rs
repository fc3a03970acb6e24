use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::{ConsentRequiredDto, ErrorDto};

/// Failures raised by the shelf engine.
///
/// Lookups of missing containers map to 404, structural violations to 400 and
/// write races or refused deletions to 409.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LibraryError {
    #[error("No library record exists for user {0}")]
    RecordNotFound(i32),

    #[error("Library '{0}' not found")]
    LibraryNotFound(String),

    #[error("Shelf {shelf_index} not found in library '{library}'")]
    ShelfNotFound { library: String, shelf_index: i32 },

    #[error("Book {0} is not placed in the requested libraries")]
    PlacementNotFound(i32),

    #[error("No book at position {position} of shelf {shelf_index} in library '{library}'")]
    PositionEmpty {
        library: String,
        shelf_index: i32,
        position: i32,
    },

    #[error("Shelf {0} is full")]
    ShelfFull(i32),

    #[error("Invalid shelf index {0}")]
    InvalidShelfIndex(i32),

    #[error("Invalid position {0}")]
    InvalidPosition(i32),

    #[error("Read progress {0} is outside 0 to 100")]
    InvalidProgress(i32),

    #[error("Library '{0}' already exists")]
    DuplicateLibrary(String),

    #[error("Books cannot be moved from library '{0}' into itself")]
    SameLibrary(String),

    /// Deletion would orphan these books and was not issued unconditionally.
    #[error("Deleting library '{library}' would remove books {orphaned:?} from every library")]
    ConsentRequired { library: String, orphaned: Vec<i32> },

    /// The record changed between read and write.
    #[error("Library record for user {0} was modified concurrently")]
    VersionConflict(i32),
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RecordNotFound(_)
            | Self::LibraryNotFound(_)
            | Self::ShelfNotFound { .. }
            | Self::PlacementNotFound(_)
            | Self::PositionEmpty { .. } => StatusCode::NOT_FOUND,
            Self::ShelfFull(_)
            | Self::InvalidShelfIndex(_)
            | Self::InvalidPosition(_)
            | Self::InvalidProgress(_)
            | Self::DuplicateLibrary(_)
            | Self::SameLibrary(_) => StatusCode::BAD_REQUEST,
            Self::ConsentRequired { .. } | Self::VersionConflict(_) => StatusCode::CONFLICT,
        };

        match self {
            Self::ConsentRequired { library, orphaned } => (
                status,
                Json(ConsentRequiredDto {
                    error: format!(
                        "Deleting library '{}' removes books that are in no other library; \
                         repeat with unconditional consent to proceed",
                        library
                    ),
                    orphaned_books: orphaned,
                }),
            )
                .into_response(),
            Self::ShelfFull(_) => (
                status,
                Json(ErrorDto {
                    error: "Invalid request: shelf full".to_string(),
                }),
            )
                .into_response(),
            err => (
                status,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
