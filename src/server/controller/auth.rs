use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        admin::{AdminDto, RegisterAdminDto, SuperAdminDto},
        api::ErrorDto,
        auth::{AdminAuthDto, LoginDto, SocialLoginDto, SuperAdminAuthDto, UserAuthDto},
        user::{RegisterUserDto, UserDto},
    },
    server::{
        error::AppError, model::user::SocialLoginParams, service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping registration and sign-in endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a reader account.
///
/// The account starts unverified and active. Email and mobile number must both be
/// unused.
///
/// # Returns
/// - `201 Created` - The new reader
/// - `400 Bad Request` - Field validation failed
/// - `409 Conflict` - Email or mobile number already registered
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = AUTH_TAG,
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "Reader registered", body = UserDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Email or mobile number already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = AuthService::new(&state.db, &state.tokens)
        .register_user(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Sign a reader in with email and password.
///
/// # Returns
/// - `200 OK` - Token and reader profile
/// - `401 Unauthorized` - Unknown email or wrong password
/// - `403 Forbidden` - Account deactivated
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = UserAuthDto),
        (status = 400, description = "Invalid login data", body = ErrorDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Account deactivated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let signed_in = AuthService::new(&state.db, &state.tokens)
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(UserAuthDto {
            token: signed_in.token,
            user: signed_in.account.into_dto(),
        }),
    ))
}

/// Sign a reader in through a social identity provider.
///
/// Links the provider to an existing account with the same email, or creates a
/// verified reader when no account exists.
#[utoipa::path(
    post,
    path = "/api/users/social-login",
    tag = AUTH_TAG,
    request_body = SocialLoginDto,
    responses(
        (status = 200, description = "Signed in", body = UserAuthDto),
        (status = 400, description = "Invalid provider data", body = ErrorDto),
        (status = 403, description = "Account deactivated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn social_login(
    State(state): State<AppState>,
    Json(payload): Json<SocialLoginDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let signed_in = AuthService::new(&state.db, &state.tokens)
        .social_login(SocialLoginParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(UserAuthDto {
            token: signed_in.token,
            user: signed_in.account.into_dto(),
        }),
    ))
}

/// Register an admin account. The admin cannot sign in until a super admin verifies it.
#[utoipa::path(
    post,
    path = "/api/admin/register",
    tag = AUTH_TAG,
    request_body = RegisterAdminDto,
    responses(
        (status = 201, description = "Admin registered, awaiting verification", body = AdminDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register_admin(
    State(state): State<AppState>,
    Json(payload): Json<RegisterAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let admin = AuthService::new(&state.db, &state.tokens)
        .register_admin(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(admin.into_dto())))
}

/// Sign an admin in.
///
/// # Returns
/// - `200 OK` - Token and admin account
/// - `401 Unauthorized` - Invalid credentials
/// - `403 Forbidden` - Admin not verified yet or deactivated
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = AdminAuthDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Admin not verified or inactive", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login_admin(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let signed_in = AuthService::new(&state.db, &state.tokens)
        .login_admin(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(AdminAuthDto {
            token: signed_in.token,
            admin: signed_in.account.into_dto(),
        }),
    ))
}

/// Register the super admin. Only one super admin may ever exist.
#[utoipa::path(
    post,
    path = "/api/superadmin/register",
    tag = AUTH_TAG,
    request_body = RegisterAdminDto,
    responses(
        (status = 201, description = "Super admin registered", body = SuperAdminDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "A super admin already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register_super_admin(
    State(state): State<AppState>,
    Json(payload): Json<RegisterAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let super_admin = AuthService::new(&state.db, &state.tokens)
        .register_super_admin(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(super_admin.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/superadmin/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = SuperAdminAuthDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Super admin inactive", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login_super_admin(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let signed_in = AuthService::new(&state.db, &state.tokens)
        .login_super_admin(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(SuperAdminAuthDto {
            token: signed_in.token,
            super_admin: signed_in.account.into_dto(),
        }),
    ))
}
