use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::{api::ErrorDto, auth::Role};

#[derive(Error, Debug)]
pub enum AuthError {
    /// Neither the body `token` field nor an `Authorization` header was present.
    #[error("Request carried no access token")]
    MissingToken,

    /// The token failed signature, expiry or shape checks.
    #[error("Rejected access token: {0}")]
    InvalidToken(String),

    /// Email and password do not match a stored account.
    #[error("Invalid credentials for {0}")]
    InvalidCredentials(String),

    /// Token decoded but the account it names no longer exists.
    #[error("{role:?} {id} from token not found")]
    PrincipalNotFound { role: Role, id: i32 },

    /// The account is deactivated or deleted.
    #[error("{role:?} {id} is not active")]
    AccountInactive { role: Role, id: i32 },

    /// Admin has registered but a super admin has not verified them yet.
    #[error("Admin {0} is not verified")]
    AdminNotVerified(i32),

    /// The caller's role does not permit the named action.
    #[error("{role:?} {id} attempted {action} without permission")]
    AccessDenied {
        role: Role,
        id: i32,
        action: String,
    },

    /// Endpoint needs a reader account but an admin token was presented.
    #[error("{0:?} token used on a reader-only endpoint")]
    ReaderAccountRequired(Role),

    /// Caller is not a current ICAdmin of the circle.
    #[error("User {user_id} is not an admin of circle {circle_id}")]
    NotCircleAdmin { user_id: i32, circle_id: i32 },

    /// Caller is not a current member of the circle.
    #[error("User {user_id} is not a member of circle {circle_id}")]
    NotCircleMember { user_id: i32, circle_id: i32 },

    /// Action is not allowed against the circle's creator.
    #[error("Creator of circle {0} cannot be removed, demoted or leave")]
    CircleCreatorProtected(i32),

    /// Only the owner of a borrow request may accept or reject it.
    #[error("User {user_id} does not own borrow request {request_id}")]
    NotRequestOwner { user_id: i32, request_id: i32 },
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and user-friendly error messages:
/// - `MissingToken` / `InvalidToken` / `PrincipalNotFound` → 401 Unauthorized
/// - `InvalidCredentials` → 401 Unauthorized with "Invalid email or password"
/// - Every other variant → 403 Forbidden with a message naming the missing right
///
/// All errors are logged at warn level with full detail while keeping client-facing
/// messages generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Authentication token is required"),
            Self::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            Self::InvalidCredentials(_) => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::PrincipalNotFound { .. } => (StatusCode::UNAUTHORIZED, "Account not found"),
            Self::AccountInactive { .. } => (StatusCode::FORBIDDEN, "Account is not active"),
            Self::AdminNotVerified(_) => {
                (StatusCode::FORBIDDEN, "Admin account is awaiting verification")
            }
            Self::AccessDenied { .. } => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action",
            ),
            Self::ReaderAccountRequired(_) => {
                (StatusCode::FORBIDDEN, "This action requires a reader account")
            }
            Self::NotCircleAdmin { .. } => {
                (StatusCode::FORBIDDEN, "Only circle admins can perform this action")
            }
            Self::NotCircleMember { .. } => {
                (StatusCode::FORBIDDEN, "You are not a member of this circle")
            }
            Self::CircleCreatorProtected(_) => (
                StatusCode::FORBIDDEN,
                "The circle creator cannot be removed, demoted or leave",
            ),
            Self::NotRequestOwner { .. } => (
                StatusCode::FORBIDDEN,
                "Only the book owner can respond to this request",
            ),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
