use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        admin::{AdminDto, UpdateAdminDto},
        api::{ErrorDto, NoPayload},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{Action, AuthGuard},
            token::TokenJson,
        },
        model::admin::UpdateAdminParams,
        service::admin::AdminService,
        state::AppState,
    },
};

/// Tag for grouping admin management endpoints in OpenAPI documentation
pub static SUPER_ADMIN_TAG: &str = "superadmin";

/// List every admin that has not been deleted.
///
/// # Access Control
/// - `ManageAdmins` - Super admin only
#[utoipa::path(
    get,
    path = "/api/superadmin/admins",
    tag = SUPER_ADMIN_TAG,
    responses(
        (status = 200, description = "All admins", body = Vec<AdminDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the super admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_admins(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageAdmins])
        .await?;

    let admins = AdminService::new(&state.db).get_all().await?;
    let admins_dto: Vec<_> = admins.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(admins_dto)))
}

#[utoipa::path(
    get,
    path = "/api/superadmin/admins/{admin_id}",
    tag = SUPER_ADMIN_TAG,
    params(("admin_id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin account", body = AdminDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the super admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_admin(
    State(state): State<AppState>,
    Path(admin_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageAdmins])
        .await?;

    let admin = AdminService::new(&state.db).get(admin_id).await?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/superadmin/admins/{admin_id}",
    tag = SUPER_ADMIN_TAG,
    params(("admin_id" = i32, Path, description = "Admin ID")),
    request_body = UpdateAdminDto,
    responses(
        (status = 200, description = "Updated admin", body = AdminDto),
        (status = 400, description = "Invalid admin data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the super admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_admin(
    State(state): State<AppState>,
    Path(admin_id): Path<i32>,
    request: TokenJson<UpdateAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageAdmins])
        .await?;

    request.payload.validate()?;

    let admin = AdminService::new(&state.db)
        .update(admin_id, UpdateAdminParams::from_dto(request.payload))
        .await?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

/// Verify an admin so it can sign in. The verifying super admin is recorded.
#[utoipa::path(
    put,
    path = "/api/superadmin/admins/{admin_id}/verify",
    tag = SUPER_ADMIN_TAG,
    params(("admin_id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin verified", body = AdminDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the super admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_admin(
    State(state): State<AppState>,
    Path(admin_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageAdmins])
        .await?;

    let admin = AdminService::new(&state.db)
        .verify(admin_id, principal.id())
        .await?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/superadmin/admins/{admin_id}",
    tag = SUPER_ADMIN_TAG,
    params(("admin_id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the super admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(admin_id): Path<i32>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ManageAdmins])
        .await?;

    AdminService::new(&state.db)
        .delete(admin_id, principal.actor())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
