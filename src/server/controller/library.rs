//! Reader-facing shelf endpoints.
//!
//! Every handler acts on the caller's own record; admins reach other readers'
//! records through the admin controller.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        analytics::ReadingBreakdownDto,
        api::{ConsentRequiredDto, ErrorDto, NoPayload},
        library::{
            CreateLibraryDto, DeleteLibraryDto, LibraryDto, LibraryRecordDto,
            LocatedPlacementDto, MoveBooksDto, MovedBooksDto, PlaceBookDto, PlacementDto,
            RecolorDto, RemoveFromLibraryQuery, RenameLibraryDto, ShelfDto, UpdateProgressDto,
            UpdateStatusDto,
        },
    },
    server::{
        error::AppError,
        middleware::{
            auth::{Action, AuthGuard},
            token::TokenJson,
        },
        model::library::{PlaceBook, PlaceOutcome},
        service::{analytics::AnalyticsService, library::LibraryService},
        state::AppState,
    },
};

/// Tag for grouping shelf endpoints in OpenAPI documentation
pub static LIBRARY_TAG: &str = "library";

#[utoipa::path(
    get,
    path = "/api/library",
    tag = LIBRARY_TAG,
    responses(
        (status = 200, description = "Own library record", body = LibraryRecordDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "No library record yet", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_library_record(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let stored = LibraryService::new(&state.db).get_record(user.id).await?;

    Ok((StatusCode::OK, Json(stored.into_dto())))
}

/// Place a book on a shelf.
///
/// Creates the record and the library on first use. A book already on the target
/// shelf is moved and updated; anywhere else it is inserted and keeps the color it
/// already has. Inserting at an occupied position shifts the placements at and
/// after it up by one.
///
/// # Access Control
/// - `ManageOwnLibrary` - Readers only
///
/// # Returns
/// - `201 Created` - The book was inserted
/// - `200 OK` - An existing placement on the shelf was updated
/// - `400 Bad Request` - Shelf full, bad shelf index, position or progress
/// - `404 Not Found` - Book does not exist
/// - `409 Conflict` - The record was modified concurrently
#[utoipa::path(
    post,
    path = "/api/library/books",
    tag = LIBRARY_TAG,
    request_body = PlaceBookDto,
    responses(
        (status = 201, description = "Book inserted", body = LibraryRecordDto),
        (status = 200, description = "Placement updated", body = LibraryRecordDto),
        (status = 400, description = "Invalid placement", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn place_book(
    State(state): State<AppState>,
    request: TokenJson<PlaceBookDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    request.payload.validate()?;

    let (stored, outcome) = LibraryService::new(&state.db)
        .place(user.id, PlaceBook::from_dto(request.payload))
        .await?;

    let status = match outcome {
        PlaceOutcome::Inserted => StatusCode::CREATED,
        PlaceOutcome::Updated => StatusCode::OK,
    };

    Ok((status, Json(stored.into_dto())))
}

/// Set the reading progress of the first occurrence of a book.
///
/// Progress 100 marks the book completed.
#[utoipa::path(
    put,
    path = "/api/library/books/{book_id}/progress",
    tag = LIBRARY_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body = UpdateProgressDto,
    responses(
        (status = 200, description = "Updated placement", body = PlacementDto),
        (status = 400, description = "Progress outside 0 to 100", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Book not placed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_progress(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    request: TokenJson<UpdateProgressDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let placement = LibraryService::new(&state.db)
        .update_progress(user.id, book_id, request.payload.read_progress)
        .await?;

    Ok((StatusCode::OK, Json(placement.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/library/books/{book_id}/status",
    tag = LIBRARY_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Updated placement", body = PlacementDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Book not placed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    request: TokenJson<UpdateStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let placement = LibraryService::new(&state.db)
        .update_status(user.id, book_id, request.payload.status)
        .await?;

    Ok((StatusCode::OK, Json(placement.into_dto())))
}

/// Recolor every occurrence of a book.
#[utoipa::path(
    put,
    path = "/api/library/books/{book_id}/color",
    tag = LIBRARY_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body = RecolorDto,
    responses(
        (status = 200, description = "Updated library record", body = LibraryRecordDto),
        (status = 400, description = "Empty color", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Book not placed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn recolor_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    request: TokenJson<RecolorDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    request.payload.validate()?;

    let stored = LibraryService::new(&state.db)
        .recolor(user.id, book_id, &request.payload.color)
        .await?;

    Ok((StatusCode::OK, Json(stored.into_dto())))
}

/// Remove a book from one library, or from every library when `library` is absent.
#[utoipa::path(
    delete,
    path = "/api/library/books/{book_id}",
    tag = LIBRARY_TAG,
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        RemoveFromLibraryQuery
    ),
    responses(
        (status = 200, description = "Updated library record", body = LibraryRecordDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Book or library not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    Query(query): Query<RemoveFromLibraryQuery>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let stored = LibraryService::new(&state.db)
        .remove(user.id, book_id, query.library.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(stored.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/library/color/{color}",
    tag = LIBRARY_TAG,
    params(("color" = String, Path, description = "Color tag")),
    responses(
        (status = 200, description = "Placements with the color", body = Vec<LocatedPlacementDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "No library record yet", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_by_color(
    State(state): State<AppState>,
    Path(color): Path<String>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let placements = LibraryService::new(&state.db)
        .by_color(user.id, &color)
        .await?;
    let placements_dto: Vec<_> = placements.into_iter().map(|p| p.into_dto()).collect();

    Ok((StatusCode::OK, Json(placements_dto)))
}

/// Create an empty library with one shelf.
#[utoipa::path(
    post,
    path = "/api/library/libraries",
    tag = LIBRARY_TAG,
    request_body = CreateLibraryDto,
    responses(
        (status = 201, description = "Library created", body = LibraryRecordDto),
        (status = 400, description = "Empty or duplicate name", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_library(
    State(state): State<AppState>,
    request: TokenJson<CreateLibraryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    request.payload.validate()?;

    let stored = LibraryService::new(&state.db)
        .create_library(user.id, &request.payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(stored.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/library/libraries/{name}",
    tag = LIBRARY_TAG,
    params(("name" = String, Path, description = "Library name")),
    responses(
        (status = 200, description = "The library", body = LibraryDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Library not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_library(
    State(state): State<AppState>,
    Path(name): Path<String>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let library = LibraryService::new(&state.db).library(user.id, &name).await?;

    Ok((StatusCode::OK, Json(library.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/library/libraries/{name}",
    tag = LIBRARY_TAG,
    params(("name" = String, Path, description = "Current library name")),
    request_body = RenameLibraryDto,
    responses(
        (status = 200, description = "Library renamed", body = LibraryRecordDto),
        (status = 400, description = "Empty or duplicate name", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Library not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn rename_library(
    State(state): State<AppState>,
    Path(name): Path<String>,
    request: TokenJson<RenameLibraryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    request.payload.validate()?;

    let stored = LibraryService::new(&state.db)
        .rename_library(user.id, &name, &request.payload.new_name)
        .await?;

    Ok((StatusCode::OK, Json(stored.into_dto())))
}

/// Delete a library.
///
/// Without unconditional consent the deletion is refused when it would remove
/// books that sit in no other library; the response lists those books so the
/// client can ask the reader and repeat the request with `"consent": "unconditional"`.
///
/// # Returns
/// - `200 OK` - Library deleted
/// - `404 Not Found` - Library not found
/// - `409 Conflict` - Consent required, with the orphaned book ids
#[utoipa::path(
    delete,
    path = "/api/library/libraries/{name}",
    tag = LIBRARY_TAG,
    params(("name" = String, Path, description = "Library name")),
    request_body = DeleteLibraryDto,
    responses(
        (status = 200, description = "Library deleted", body = LibraryRecordDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Library not found", body = ErrorDto),
        (status = 409, description = "Deletion would orphan books", body = ConsentRequiredDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_library(
    State(state): State<AppState>,
    Path(name): Path<String>,
    request: TokenJson<DeleteLibraryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let stored = LibraryService::new(&state.db)
        .delete_library(user.id, &name, request.payload.consent)
        .await?;

    Ok((StatusCode::OK, Json(stored.into_dto())))
}

/// Append an empty shelf to a library.
#[utoipa::path(
    post,
    path = "/api/library/libraries/{name}/shelves",
    tag = LIBRARY_TAG,
    params(("name" = String, Path, description = "Library name")),
    responses(
        (status = 201, description = "Shelf added", body = LibraryRecordDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Library not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_shelf(
    State(state): State<AppState>,
    Path(name): Path<String>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let (stored, shelf_id) = LibraryService::new(&state.db)
        .add_shelf(user.id, &name)
        .await?;

    tracing::debug!("User {} added shelf {} to '{}'", user.id, shelf_id, name);

    Ok((StatusCode::CREATED, Json(stored.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/library/libraries/{name}/shelves/{shelf_index}",
    tag = LIBRARY_TAG,
    params(
        ("name" = String, Path, description = "Library name"),
        ("shelf_index" = i32, Path, description = "Zero based shelf index")
    ),
    responses(
        (status = 200, description = "The shelf", body = ShelfDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Library or shelf not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_shelf(
    State(state): State<AppState>,
    Path((name, shelf_index)): Path<(String, i32)>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let shelf = LibraryService::new(&state.db)
        .shelf(user.id, &name, shelf_index)
        .await?;

    Ok((StatusCode::OK, Json(shelf.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/library/libraries/{name}/shelves/{shelf_index}/positions/{position}",
    tag = LIBRARY_TAG,
    params(
        ("name" = String, Path, description = "Library name"),
        ("shelf_index" = i32, Path, description = "Zero based shelf index"),
        ("position" = i32, Path, description = "Position on the shelf")
    ),
    responses(
        (status = 200, description = "The placement", body = PlacementDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Nothing at that location", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_placement(
    State(state): State<AppState>,
    Path((name, shelf_index, position)): Path<(String, i32, i32)>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let placement = LibraryService::new(&state.db)
        .placement_at(user.id, &name, shelf_index, position)
        .await?;

    Ok((StatusCode::OK, Json(placement.into_dto())))
}

/// Move books from one library into the first shelf of another.
///
/// Books with no placement in the source library are skipped; the response lists
/// the ones that moved.
#[utoipa::path(
    post,
    path = "/api/library/move",
    tag = LIBRARY_TAG,
    request_body = MoveBooksDto,
    responses(
        (status = 200, description = "Books moved", body = MovedBooksDto),
        (status = 400, description = "Same library or target shelf full", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Library not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn move_books(
    State(state): State<AppState>,
    request: TokenJson<MoveBooksDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let MoveBooksDto { from, to, book_ids } = request.payload;
    let moved = LibraryService::new(&state.db)
        .move_books(user.id, &from, &to, &book_ids)
        .await?;

    Ok((StatusCode::OK, Json(MovedBooksDto { moved })))
}

/// The caller's placements by source type and genre category.
#[utoipa::path(
    get,
    path = "/api/library/breakdown",
    tag = LIBRARY_TAG,
    responses(
        (status = 200, description = "Reading breakdown", body = ReadingBreakdownDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_breakdown(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::ManageOwnLibrary])
        .await?;

    let breakdown = AnalyticsService::new(&state.db)
        .reading_breakdown(user.id)
        .await?;

    Ok((StatusCode::OK, Json(breakdown.into_dto())))
}
