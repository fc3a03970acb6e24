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
        api::{ErrorDto, NoPayload, PaginationParams},
        library::{
            Consent, LibraryRecordDto, PlacementDto, RemoveFromLibraryQuery, UpdateProgressDto,
            UpdateStatusDto,
        },
        user::{PaginatedUsersDto, UpdateUserDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{Action, AuthGuard},
            token::TokenJson,
        },
        model::user::UpdateUserParams,
        service::{analytics::AnalyticsService, library::LibraryService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping admin user management endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Get paginated readers.
///
/// Deleted readers are excluded. Accessible by admins and the super admin.
///
/// # Access Control
/// - `GetUsers`
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `params` - Pagination parameters (page and entries)
/// - `request` - Token carried in the body or `Authorization` header
///
/// # Returns
/// - `200 OK` - Paginated list of readers
/// - `401 Unauthorized` - Missing or invalid token
/// - `403 Forbidden` - Caller may not list readers
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Successfully retrieved readers", body = PaginatedUsersDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetUsers])
        .await?;

    let users = UserService::new(&state.db)
        .get_all(params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Reader ID")),
    responses(
        (status = 200, description = "Reader profile", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Reader not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetUser])
        .await?;

    let profile = UserService::new(&state.db).get_profile(user_id).await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Reader ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated reader", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Reader not found", body = ErrorDto),
        (status = 409, description = "Mobile number already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    request: TokenJson<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::UpdateUser])
        .await?;

    request.payload.validate()?;

    let profile = UserService::new(&state.db)
        .update(user_id, UpdateUserParams::from_dto(request.payload))
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Soft delete a reader, recording the acting admin.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Reader ID")),
    responses(
        (status = 204, description = "Reader deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Reader not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::DeleteUser])
        .await?;

    UserService::new(&state.db)
        .delete(user_id, principal.actor())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deactivate a reader. Deactivated readers cannot sign in or use their token.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/deactivate",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Reader ID")),
    responses(
        (status = 200, description = "Reader deactivated", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Reader not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::DeactivateUser])
        .await?;

    let profile = UserService::new(&state.db)
        .deactivate(user_id, principal.actor())
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/activate",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Reader ID")),
    responses(
        (status = 200, description = "Reader activated", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Reader not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn activate_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ActivateUser])
        .await?;

    let profile = UserService::new(&state.db).activate(user_id).await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Get a reader's full library record.
///
/// # Access Control
/// - `GetUserBooks`
///
/// # Returns
/// - `200 OK` - Every library, shelf and placement of the reader
/// - `404 Not Found` - The reader has no library record yet
#[utoipa::path(
    get,
    path = "/api/admin/users/{user_id}/library",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Reader ID")),
    responses(
        (status = 200, description = "Reader's library record", body = LibraryRecordDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "No library record", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_library(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetUserBooks])
        .await?;

    let stored = LibraryService::new(&state.db).get_record(user_id).await?;

    Ok((StatusCode::OK, Json(stored.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/books/{book_id}/progress",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "Reader ID"),
        ("book_id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateProgressDto,
    responses(
        (status = 200, description = "Updated placement", body = PlacementDto),
        (status = 400, description = "Progress outside 0 to 100", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Book not placed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_progress(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(i32, i32)>,
    request: TokenJson<UpdateProgressDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::UpdateUserBooks])
        .await?;

    let placement = LibraryService::new(&state.db)
        .update_progress(user_id, book_id, request.payload.read_progress)
        .await?;

    Ok((StatusCode::OK, Json(placement.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/books/{book_id}/status",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "Reader ID"),
        ("book_id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Updated placement", body = PlacementDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Book not placed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(i32, i32)>,
    request: TokenJson<UpdateStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::UpdateUserBooks])
        .await?;

    let placement = LibraryService::new(&state.db)
        .update_status(user_id, book_id, request.payload.status)
        .await?;

    Ok((StatusCode::OK, Json(placement.into_dto())))
}

/// Remove a book from a reader's libraries.
///
/// With `library` set only the first occurrence in that library goes; otherwise
/// every occurrence is removed.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}/books/{book_id}",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "Reader ID"),
        ("book_id" = i32, Path, description = "Book ID"),
        RemoveFromLibraryQuery
    ),
    responses(
        (status = 200, description = "Updated library record", body = LibraryRecordDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Book not placed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user_book(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(i32, i32)>,
    Query(query): Query<RemoveFromLibraryQuery>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::DeleteUserBooks])
        .await?;

    let stored = LibraryService::new(&state.db)
        .remove(user_id, book_id, query.library.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(stored.into_dto())))
}

/// Delete one of a reader's libraries without asking for consent.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}/libraries/{name}",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "Reader ID"),
        ("name" = String, Path, description = "Library name")
    ),
    responses(
        (status = 200, description = "Updated library record", body = LibraryRecordDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Library not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user_library(
    State(state): State<AppState>,
    Path((user_id, name)): Path<(i32, String)>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::DeleteUserBooks])
        .await?;

    let stored = LibraryService::new(&state.db)
        .delete_library(user_id, &name, Consent::Unconditional)
        .await?;

    Ok((StatusCode::OK, Json(stored.into_dto())))
}

/// Placements of a reader broken down by source type and genre category.
#[utoipa::path(
    get,
    path = "/api/admin/users/{user_id}/reading",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Reader ID")),
    responses(
        (status = 200, description = "Reading breakdown", body = ReadingBreakdownDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_reading(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ViewAnalytics, Action::GetUserBooks])
        .await?;

    let breakdown = AnalyticsService::new(&state.db)
        .reading_breakdown(user_id)
        .await?;

    Ok((StatusCode::OK, Json(breakdown.into_dto())))
}
