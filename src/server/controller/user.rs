use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, NoPayload},
        user::{UpdateUserDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, token::TokenJson},
        model::user::UpdateUserParams,
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping reader self-service endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// GET /api/users/me - Profile of the signed-in reader
///
/// # Authentication
/// Any active reader; admins are refused.
///
/// # Returns
/// - `200 OK`: The reader's profile with circle memberships
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: Caller is not a reader or is deactivated
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Own profile", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[])
        .await?;

    let profile = UserService::new(&state.db).get_profile(user.id).await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// PUT /api/users/me - Update name, mobile number or profile image
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = USER_TAG,
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated profile", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 409, description = "Mobile number already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    request: TokenJson<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require_reader(request.token(), &[])
        .await?;

    request.payload.validate()?;

    let profile = UserService::new(&state.db)
        .update(user.id, UpdateUserParams::from_dto(request.payload))
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// DELETE /api/users/me - Soft delete the reader's own account
///
/// The account is purged for good once the retention window has passed.
#[utoipa::path(
    delete,
    path = "/api/users/me",
    tag = USER_TAG,
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a reader", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_me(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[])
        .await?;
    let actor = principal.actor();
    let user = principal.into_user()?;

    UserService::new(&state.db).delete(user.id, actor).await?;

    Ok(StatusCode::NO_CONTENT)
}
