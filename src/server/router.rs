use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{admin, analytics, auth, book, borrow, circle, genre, library, super_admin, user},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Boipoka API", description = "Book tracking, shelving, lending and reading circles"),
    tags(
        (name = "auth", description = "Registration and sign-in"),
        (name = "user", description = "Reader self-service"),
        (name = "admin", description = "Reader management by admins"),
        (name = "superadmin", description = "Admin management by the super admin"),
        (name = "book", description = "Book catalog"),
        (name = "genre", description = "Genres and their categories"),
        (name = "library", description = "Libraries, shelves and placements"),
        (name = "borrow", description = "Borrow requests between readers"),
        (name = "circle", description = "Inner circles"),
        (name = "analytics", description = "Catalog and reading reports")
    )
)]
struct ApiDoc;

/// Builds the API router together with its OpenAPI document.
///
/// Swagger UI is served at `/api/docs` and the raw document at `/api/openapi.json`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .merge(super_admin_routes())
        .merge(book_routes())
        .merge(genre_routes())
        .merge(library_routes())
        .merge(borrow_routes())
        .merge(circle_routes())
        .merge(analytics_routes())
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", api))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::register_user))
        .routes(routes!(auth::login_user))
        .routes(routes!(auth::social_login))
        .routes(routes!(auth::register_admin))
        .routes(routes!(auth::login_admin))
        .routes(routes!(auth::register_super_admin))
        .routes(routes!(auth::login_super_admin))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(user::get_me, user::update_me, user::delete_me))
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(admin::get_users))
        .routes(routes!(
            admin::get_user,
            admin::update_user,
            admin::delete_user
        ))
        .routes(routes!(admin::deactivate_user))
        .routes(routes!(admin::activate_user))
        .routes(routes!(admin::get_user_library))
        .routes(routes!(admin::update_user_progress))
        .routes(routes!(admin::update_user_status))
        .routes(routes!(admin::delete_user_book))
        .routes(routes!(admin::delete_user_library))
        .routes(routes!(admin::get_user_reading))
}

fn super_admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(super_admin::get_admins))
        .routes(routes!(
            super_admin::get_admin,
            super_admin::update_admin,
            super_admin::delete_admin
        ))
        .routes(routes!(super_admin::verify_admin))
}

fn book_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(book::get_books))
        .routes(routes!(book::import_books))
        .routes(routes!(book::search_books))
        .routes(routes!(book::filter_books))
        .routes(routes!(book::get_book_by_isbn))
        .routes(routes!(book::get_books_by_genre))
        .routes(routes!(book::get_books_by_author))
        .routes(routes!(book::get_book, book::update_book, book::delete_book))
        .routes(routes!(book::get_similar_books))
}

fn genre_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(genre::get_genres, genre::create_genre))
        .routes(routes!(genre::move_genre))
        .routes(routes!(genre::delete_genre))
}

fn library_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(library::get_library_record))
        .routes(routes!(library::place_book))
        .routes(routes!(library::update_progress))
        .routes(routes!(library::update_status))
        .routes(routes!(library::recolor_book))
        .routes(routes!(library::remove_book))
        .routes(routes!(library::get_by_color))
        .routes(routes!(library::create_library))
        .routes(routes!(
            library::get_library,
            library::rename_library,
            library::delete_library
        ))
        .routes(routes!(library::add_shelf))
        .routes(routes!(library::get_shelf))
        .routes(routes!(library::get_placement))
        .routes(routes!(library::move_books))
        .routes(routes!(library::get_breakdown))
}

fn borrow_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(borrow::create_request))
        .routes(routes!(borrow::accept_request))
        .routes(routes!(borrow::reject_request))
        .routes(routes!(borrow::get_sent))
        .routes(routes!(borrow::get_received))
        .routes(routes!(borrow::get_borrowed))
        .routes(routes!(borrow::get_loaned))
}

fn circle_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(circle::create_circle))
        .routes(routes!(circle::get_my_circles))
        .routes(routes!(circle::get_my_invites))
        .routes(routes!(circle::get_members))
        .routes(routes!(circle::invite_member))
        .routes(routes!(circle::accept_invite))
        .routes(routes!(circle::reject_invite))
        .routes(routes!(circle::leave_circle))
        .routes(routes!(circle::remove_member))
        .routes(routes!(circle::promote_member, circle::demote_admin))
        .routes(routes!(circle::add_genre, circle::remove_genre))
        .routes(routes!(circle::add_isbn, circle::remove_isbn))
        .routes(routes!(circle::delete_circle))
}

fn analytics_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(analytics::get_summary))
        .routes(routes!(analytics::get_genre_distribution))
        .routes(routes!(analytics::get_most_placed))
}
