use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, NoPayload},
        borrow::{BorrowRequestDto, BorrowedBookDto, CreateBorrowRequestDto, LoanedBookDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{Action, AuthGuard},
            token::TokenJson,
        },
        model::borrow::{BorrowRequest, CreateBorrowParams},
        service::borrow::BorrowService,
        state::AppState,
    },
};

/// Tag for grouping borrow request endpoints in OpenAPI documentation
pub static BORROW_TAG: &str = "borrow";

fn requests_dto(requests: Vec<BorrowRequest>) -> Vec<BorrowRequestDto> {
    requests.into_iter().map(|r| r.into_dto()).collect()
}

/// Ask another reader to lend a book.
///
/// # Access Control
/// - `Borrow` - Readers only
///
/// # Returns
/// - `201 Created` - The pending request
/// - `400 Bad Request` - Asking oneself, or the due date is not in the future
/// - `404 Not Found` - Owner or book not found, or the owner has not placed the book
/// - `409 Conflict` - A pending request for the same book and owner already exists
#[utoipa::path(
    post,
    path = "/api/borrow-requests",
    tag = BORROW_TAG,
    request_body = CreateBorrowRequestDto,
    responses(
        (status = 201, description = "Request created", body = BorrowRequestDto),
        (status = 400, description = "Invalid request", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "Owner or book not found", body = ErrorDto),
        (status = 409, description = "Duplicate pending request", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_request(
    State(state): State<AppState>,
    request: TokenJson<CreateBorrowRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::Borrow])
        .await?;

    let params = CreateBorrowParams {
        book_id: request.payload.book_id,
        owner_id: request.payload.owner_id,
        requester_id: user.id,
        requested_until: request.payload.requested_until,
    };

    let created = BorrowService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(created.into_dto())))
}

/// Accept a pending request addressed to the caller.
///
/// The book is placed in the requester's "Borrowed Books" library in the same transaction.
#[utoipa::path(
    post,
    path = "/api/borrow-requests/{request_id}/accept",
    tag = BORROW_TAG,
    params(("request_id" = i32, Path, description = "Borrow request ID")),
    responses(
        (status = 200, description = "Request accepted", body = BorrowRequestDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the request", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 409, description = "Request already answered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_request(
    State(state): State<AppState>,
    Path(request_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::Borrow])
        .await?;

    let accepted = BorrowService::new(&state.db)
        .accept(user.id, request_id)
        .await?;

    Ok((StatusCode::OK, Json(accepted.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/borrow-requests/{request_id}/reject",
    tag = BORROW_TAG,
    params(("request_id" = i32, Path, description = "Borrow request ID")),
    responses(
        (status = 200, description = "Request rejected", body = BorrowRequestDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the request", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 409, description = "Request already answered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_request(
    State(state): State<AppState>,
    Path(request_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::Borrow])
        .await?;

    let rejected = BorrowService::new(&state.db)
        .reject(user.id, request_id)
        .await?;

    Ok((StatusCode::OK, Json(rejected.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/borrow-requests/sent",
    tag = BORROW_TAG,
    responses(
        (status = 200, description = "Requests the caller sent", body = Vec<BorrowRequestDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_sent(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::Borrow])
        .await?;

    let sent = BorrowService::new(&state.db).sent(user.id).await?;

    Ok((StatusCode::OK, Json(requests_dto(sent))))
}

#[utoipa::path(
    get,
    path = "/api/borrow-requests/received",
    tag = BORROW_TAG,
    responses(
        (status = 200, description = "Requests addressed to the caller", body = Vec<BorrowRequestDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_received(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::Borrow])
        .await?;

    let received = BorrowService::new(&state.db).received(user.id).await?;

    Ok((StatusCode::OK, Json(requests_dto(received))))
}

/// Accepted requests where the caller borrowed, with each owner's public profile.
#[utoipa::path(
    get,
    path = "/api/borrowed-books",
    tag = BORROW_TAG,
    responses(
        (status = 200, description = "Books the caller borrowed", body = Vec<BorrowedBookDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_borrowed(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::Borrow])
        .await?;

    let borrowed = BorrowService::new(&state.db).borrowed(user.id).await?;
    let borrowed_dto: Vec<_> = borrowed.into_iter().map(|b| b.into_dto()).collect();

    Ok((StatusCode::OK, Json(borrowed_dto)))
}

/// Accepted requests where the caller lent, with each requester's public profile.
#[utoipa::path(
    get,
    path = "/api/loaned-books",
    tag = BORROW_TAG,
    responses(
        (status = 200, description = "Books the caller lent", body = Vec<LoanedBookDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_loaned(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::Borrow])
        .await?;

    let loaned = BorrowService::new(&state.db).loaned(user.id).await?;
    let loaned_dto: Vec<_> = loaned.into_iter().map(|l| l.into_dto()).collect();

    Ok((StatusCode::OK, Json(loaned_dto)))
}
