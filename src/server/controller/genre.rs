use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, NoPayload},
        genre::{CreateGenreDto, GenreDto, MoveGenreDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{Action, AuthGuard},
            token::TokenJson,
        },
        service::genre::GenreService,
        state::AppState,
    },
};

/// Tag for grouping genre endpoints in OpenAPI documentation
pub static GENRE_TAG: &str = "genre";

#[utoipa::path(
    get,
    path = "/api/genres",
    tag = GENRE_TAG,
    responses(
        (status = 200, description = "All genres", body = Vec<GenreDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_genres(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ViewGenres])
        .await?;

    let genres = GenreService::new(&state.db).get_all().await?;
    let genres_dto: Vec<_> = genres.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(genres_dto)))
}

/// Add a genre under one of the four categories.
///
/// # Access Control
/// - `ManageGenres`
///
/// # Returns
/// - `201 Created` - The new genre
/// - `409 Conflict` - A genre with the same name exists
#[utoipa::path(
    post,
    path = "/api/genres",
    tag = GENRE_TAG,
    request_body = CreateGenreDto,
    responses(
        (status = 201, description = "Genre created", body = GenreDto),
        (status = 400, description = "Invalid genre data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 409, description = "Genre already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_genre(
    State(state): State<AppState>,
    request: TokenJson<CreateGenreDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageGenres])
        .await?;

    request.payload.validate()?;

    let genre = GenreService::new(&state.db)
        .create(request.payload.name, request.payload.category)
        .await?;

    Ok((StatusCode::CREATED, Json(genre.into_dto())))
}

/// Move a genre to another category.
#[utoipa::path(
    put,
    path = "/api/genres/{genre_id}/category",
    tag = GENRE_TAG,
    params(("genre_id" = i32, Path, description = "Genre ID")),
    request_body = MoveGenreDto,
    responses(
        (status = 200, description = "Genre moved", body = GenreDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Genre not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn move_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<i32>,
    request: TokenJson<MoveGenreDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageGenres])
        .await?;

    let genre = GenreService::new(&state.db)
        .move_to(genre_id, request.payload.category)
        .await?;

    Ok((StatusCode::OK, Json(genre.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/genres/{genre_id}",
    tag = GENRE_TAG,
    params(("genre_id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Genre not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageGenres])
        .await?;

    GenreService::new(&state.db).delete(genre_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
