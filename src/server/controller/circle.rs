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
        circle::{
            CircleDto, CircleGenreDto, CircleIsbnDto, CircleMembersDto, CreateCircleDto,
            InviteDto, MemberDto,
        },
    },
    server::{
        error::AppError,
        middleware::{
            auth::{Action, AuthGuard},
            token::TokenJson,
        },
        model::circle::{CreateCircleParams, InnerCircle},
        service::circle::{CircleList, CircleService},
        state::AppState,
    },
};

/// Tag for grouping inner circle endpoints in OpenAPI documentation
pub static CIRCLE_TAG: &str = "circle";

fn circles_dto(circles: Vec<InnerCircle>) -> Vec<CircleDto> {
    circles.into_iter().map(|c| c.into_dto()).collect()
}

/// Create an inner circle.
///
/// The caller becomes its first member, as an accepted ICAdmin.
///
/// # Access Control
/// - `InnerCircle` - Readers only
///
/// # Returns
/// - `201 Created` - The circle with its members
/// - `400 Bad Request` - Empty circle name
/// - `409 Conflict` - Circle name already taken
#[utoipa::path(
    post,
    path = "/api/circles",
    tag = CIRCLE_TAG,
    request_body = CreateCircleDto,
    responses(
        (status = 201, description = "Circle created", body = CircleMembersDto),
        (status = 400, description = "Invalid circle data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 409, description = "Circle name taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_circle(
    State(state): State<AppState>,
    request: TokenJson<CreateCircleDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    request.payload.validate()?;

    let circle = CircleService::new(&state.db)
        .create(CreateCircleParams::from_dto(request.payload, user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(circle.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/circles/mine",
    tag = CIRCLE_TAG,
    responses(
        (status = 200, description = "Circles the caller belongs to", body = Vec<CircleDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_circles(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let circles = CircleService::new(&state.db).my_circles(user.id).await?;

    Ok((StatusCode::OK, Json(circles_dto(circles))))
}

#[utoipa::path(
    get,
    path = "/api/circles/invites",
    tag = CIRCLE_TAG,
    responses(
        (status = 200, description = "Circles with a pending invite", body = Vec<CircleDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_invites(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let circles = CircleService::new(&state.db).my_invites(user.id).await?;

    Ok((StatusCode::OK, Json(circles_dto(circles))))
}

/// Active members of a circle. Only visible to its members.
#[utoipa::path(
    get,
    path = "/api/circles/{circle_id}/members",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    responses(
        (status = 200, description = "Circle and its members", body = CircleMembersDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a member", body = ErrorDto),
        (status = 404, description = "Circle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_members(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let circle = CircleService::new(&state.db)
        .members(user.id, circle_id)
        .await?;

    Ok((StatusCode::OK, Json(circle.into_dto())))
}

/// Invite a reader into the circle.
///
/// Readers who rejected an earlier invite or were removed can be invited again.
///
/// # Returns
/// - `201 Created` - The pending member entry
/// - `403 Forbidden` - Caller is not an ICAdmin of the circle
/// - `404 Not Found` - Circle or invitee not found
/// - `409 Conflict` - Invitee is already a member or already invited
#[utoipa::path(
    post,
    path = "/api/circles/{circle_id}/invites",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    request_body = InviteDto,
    responses(
        (status = 201, description = "Invite sent", body = MemberDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a circle admin", body = ErrorDto),
        (status = 404, description = "Circle or invitee not found", body = ErrorDto),
        (status = 409, description = "Already a member or invited", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn invite_member(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<InviteDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let member = CircleService::new(&state.db)
        .invite(user.id, circle_id, request.payload.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(member.into_dto())))
}

/// Accept a pending invite. A second accept finds no invite and returns 404.
#[utoipa::path(
    post,
    path = "/api/circles/{circle_id}/accept",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    responses(
        (status = 200, description = "Invite accepted", body = MemberDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "No pending invite", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_invite(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let member = CircleService::new(&state.db)
        .accept_invite(user.id, circle_id)
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/circles/{circle_id}/reject",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    responses(
        (status = 200, description = "Invite rejected", body = MemberDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 404, description = "No pending invite", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_invite(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let member = CircleService::new(&state.db)
        .reject_invite(user.id, circle_id)
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}

/// Leave a circle. The creator cannot leave.
#[utoipa::path(
    post,
    path = "/api/circles/{circle_id}/leave",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    responses(
        (status = 204, description = "Left the circle"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member, or the creator", body = ErrorDto),
        (status = 404, description = "Circle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_circle(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    CircleService::new(&state.db).leave(user.id, circle_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a member. The entry is kept, marked removed, so the reader can be re-invited.
#[utoipa::path(
    delete,
    path = "/api/circles/{circle_id}/members/{user_id}",
    tag = CIRCLE_TAG,
    params(
        ("circle_id" = i32, Path, description = "Circle ID"),
        ("user_id" = i32, Path, description = "Member to remove")
    ),
    responses(
        (status = 200, description = "Member removed", body = MemberDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a circle admin, or target is the creator", body = ErrorDto),
        (status = 404, description = "Circle or member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_member(
    State(state): State<AppState>,
    Path((circle_id, user_id)): Path<(i32, i32)>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let member = CircleService::new(&state.db)
        .remove_member(user.id, circle_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/circles/{circle_id}/admins/{user_id}",
    tag = CIRCLE_TAG,
    params(
        ("circle_id" = i32, Path, description = "Circle ID"),
        ("user_id" = i32, Path, description = "Member to promote")
    ),
    responses(
        (status = 200, description = "Member promoted", body = MemberDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a circle admin", body = ErrorDto),
        (status = 404, description = "Circle or member not found", body = ErrorDto),
        (status = 409, description = "Already an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn promote_member(
    State(state): State<AppState>,
    Path((circle_id, user_id)): Path<(i32, i32)>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let member = CircleService::new(&state.db)
        .promote(user.id, circle_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}

/// Demote an ICAdmin. The creator and the last remaining admin stay admins.
#[utoipa::path(
    delete,
    path = "/api/circles/{circle_id}/admins/{user_id}",
    tag = CIRCLE_TAG,
    params(
        ("circle_id" = i32, Path, description = "Circle ID"),
        ("user_id" = i32, Path, description = "Admin to demote")
    ),
    responses(
        (status = 200, description = "Admin demoted", body = MemberDto),
        (status = 400, description = "Target is the last admin", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a circle admin, or target is the creator", body = ErrorDto),
        (status = 404, description = "Circle or member not found", body = ErrorDto),
        (status = 409, description = "Target is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn demote_admin(
    State(state): State<AppState>,
    Path((circle_id, user_id)): Path<(i32, i32)>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let member = CircleService::new(&state.db)
        .demote(user.id, circle_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/circles/{circle_id}/genres",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    request_body = CircleGenreDto,
    responses(
        (status = 200, description = "Genre added", body = CircleDto),
        (status = 400, description = "Empty genre", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a circle admin", body = ErrorDto),
        (status = 404, description = "Circle not found", body = ErrorDto),
        (status = 409, description = "Genre already listed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_genre(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<CircleGenreDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    request.payload.validate()?;

    let circle = CircleService::new(&state.db)
        .add_to_list(user.id, circle_id, CircleList::Genres, &request.payload.genre)
        .await?;

    Ok((StatusCode::OK, Json(circle.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/circles/{circle_id}/genres",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    request_body = CircleGenreDto,
    responses(
        (status = 200, description = "Genre removed", body = CircleDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a circle admin", body = ErrorDto),
        (status = 404, description = "Circle or genre not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_genre(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<CircleGenreDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let circle = CircleService::new(&state.db)
        .remove_from_list(user.id, circle_id, CircleList::Genres, &request.payload.genre)
        .await?;

    Ok((StatusCode::OK, Json(circle.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/circles/{circle_id}/isbns",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    request_body = CircleIsbnDto,
    responses(
        (status = 200, description = "ISBN added", body = CircleDto),
        (status = 400, description = "Empty ISBN", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a circle admin", body = ErrorDto),
        (status = 404, description = "Circle not found", body = ErrorDto),
        (status = 409, description = "ISBN already listed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_isbn(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<CircleIsbnDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    request.payload.validate()?;

    let circle = CircleService::new(&state.db)
        .add_to_list(user.id, circle_id, CircleList::Isbns, &request.payload.isbn)
        .await?;

    Ok((StatusCode::OK, Json(circle.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/circles/{circle_id}/isbns",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    request_body = CircleIsbnDto,
    responses(
        (status = 200, description = "ISBN removed", body = CircleDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a circle admin", body = ErrorDto),
        (status = 404, description = "Circle or ISBN not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_isbn(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<CircleIsbnDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    let circle = CircleService::new(&state.db)
        .remove_from_list(user.id, circle_id, CircleList::Isbns, &request.payload.isbn)
        .await?;

    Ok((StatusCode::OK, Json(circle.into_dto())))
}

/// Delete a circle.
///
/// Member entries go with it and the circle disappears from every former member's
/// circle list, all in one transaction.
#[utoipa::path(
    delete,
    path = "/api/circles/{circle_id}",
    tag = CIRCLE_TAG,
    params(("circle_id" = i32, Path, description = "Circle ID")),
    responses(
        (status = 204, description = "Circle deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a circle admin", body = ErrorDto),
        (status = 404, description = "Circle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_circle(
    State(state): State<AppState>,
    Path(circle_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[Action::InnerCircle])
        .await?;

    CircleService::new(&state.db).delete(user.id, circle_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
