use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, NoPayload, PaginationParams},
        book::{BookDto, FilterQuery, PaginatedBooksDto, SearchQuery, UpdateBookDto, VolumesDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{Action, AuthGuard},
            token::TokenJson,
        },
        model::book::{Book, BookFilter, UpdateBookParams},
        service::book::BookService,
        state::AppState,
    },
};

/// Tag for grouping catalog endpoints in OpenAPI documentation
pub static BOOK_TAG: &str = "book";

fn books_dto(books: Vec<Book>) -> Vec<BookDto> {
    books.into_iter().map(|b| b.into_dto()).collect()
}

/// Import volumes in the external catalog's shape.
///
/// Each volume is normalized and upserted by ISBN: a volume sharing any ISBN with
/// a stored book refreshes that book and adds its new ISBNs.
///
/// # Access Control
/// - `ManageBooks` - Admins and the super admin
///
/// # Returns
/// - `201 Created` - Created or refreshed books
/// - `400 Bad Request` - No volume carried a title and an ISBN
/// - `401 Unauthorized` / `403 Forbidden` - Authentication or permission failure
#[utoipa::path(
    post,
    path = "/api/books/import",
    tag = BOOK_TAG,
    request_body = VolumesDto,
    responses(
        (status = 201, description = "Books imported", body = Vec<BookDto>),
        (status = 400, description = "No importable volume", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn import_books(
    State(state): State<AppState>,
    request: TokenJson<VolumesDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageBooks])
        .await?;

    let books = BookService::new(&state.db, &state.catalog)
        .import(request.payload)
        .await?;

    Ok((StatusCode::CREATED, Json(books_dto(books))))
}

/// Paginated list of active books, newest first.
#[utoipa::path(
    get,
    path = "/api/books",
    tag = BOOK_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of books", body = PaginatedBooksDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_books(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageBooks])
        .await?;

    let books = BookService::new(&state.db, &state.catalog)
        .get_paginated(params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(books.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/books/{book_id}",
    tag = BOOK_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "The book", body = BookDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetBooks])
        .await?;

    let book = BookService::new(&state.db, &state.catalog)
        .get_by_id(book_id)
        .await?;

    Ok((StatusCode::OK, Json(book.into_dto())))
}

/// Look a book up by ISBN, asking the external catalog on a local miss.
#[utoipa::path(
    get,
    path = "/api/books/isbn/{isbn}",
    tag = BOOK_TAG,
    params(("isbn" = String, Path, description = "ISBN-10 or ISBN-13")),
    responses(
        (status = 200, description = "The book", body = BookDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Unknown locally and to the external catalog", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetBooks])
        .await?;

    let book = BookService::new(&state.db, &state.catalog)
        .get_by_isbn(&isbn)
        .await?;

    Ok((StatusCode::OK, Json(book.into_dto())))
}

/// Free text search over titles and authors.
///
/// Local matches are returned when there are any; otherwise the external catalog
/// is queried and its results are stored.
#[utoipa::path(
    get,
    path = "/api/books/search",
    tag = BOOK_TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetBooks])
        .await?;

    let books = BookService::new(&state.db, &state.catalog)
        .search(&query.q)
        .await?;

    Ok((StatusCode::OK, Json(books_dto(books))))
}

#[utoipa::path(
    get,
    path = "/api/books/genre/{genre}",
    tag = BOOK_TAG,
    params(("genre" = String, Path, description = "Genre name")),
    responses(
        (status = 200, description = "Books in the genre", body = Vec<BookDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "No books in the genre", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_books_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetBooks])
        .await?;

    let books = BookService::new(&state.db, &state.catalog)
        .by_genre(&genre)
        .await?;

    Ok((StatusCode::OK, Json(books_dto(books))))
}

#[utoipa::path(
    get,
    path = "/api/books/author/{author}",
    tag = BOOK_TAG,
    params(("author" = String, Path, description = "Author name")),
    responses(
        (status = 200, description = "Books by the author", body = Vec<BookDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "No books by the author", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetBooks])
        .await?;

    let books = BookService::new(&state.db, &state.catalog)
        .by_author(&author)
        .await?;

    Ok((StatusCode::OK, Json(books_dto(books))))
}

/// Books sharing a genre or an author with the given book.
#[utoipa::path(
    get,
    path = "/api/books/{book_id}/similar",
    tag = BOOK_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Similar books", body = Vec<BookDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Book not found or nothing similar", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_similar_books(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetBooks])
        .await?;

    let books = BookService::new(&state.db, &state.catalog)
        .similar(book_id)
        .await?;

    Ok((StatusCode::OK, Json(books_dto(books))))
}

/// Filter by comma separated genres and a minimum rating, newest first.
#[utoipa::path(
    get,
    path = "/api/books/filter",
    tag = BOOK_TAG,
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "No matching books", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn filter_books(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::GetBooks])
        .await?;

    let books = BookService::new(&state.db, &state.catalog)
        .filtered(BookFilter::from_query(query))
        .await?;

    Ok((StatusCode::OK, Json(books_dto(books))))
}

/// Edit the master record of a book.
#[utoipa::path(
    put,
    path = "/api/books/{book_id}",
    tag = BOOK_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body = UpdateBookDto,
    responses(
        (status = 200, description = "Updated book", body = BookDto),
        (status = 400, description = "Invalid book data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    request: TokenJson<UpdateBookDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageBooks])
        .await?;

    request.payload.validate()?;

    let book = BookService::new(&state.db, &state.catalog)
        .update(book_id, UpdateBookParams::from_dto(request.payload))
        .await?;

    Ok((StatusCode::OK, Json(book.into_dto())))
}

/// Soft delete a book. Placements referencing it stay in readers' libraries.
#[utoipa::path(
    delete,
    path = "/api/books/{book_id}",
    tag = BOOK_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageBooks])
        .await?;

    BookService::new(&state.db, &state.catalog)
        .delete(book_id, principal.actor())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
