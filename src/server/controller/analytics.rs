use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        analytics::{CatalogSummaryDto, GenreShareDto, MostPlacedDto, MostPlacedQuery},
        api::{ErrorDto, NoPayload},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{Action, AuthGuard},
            token::TokenJson,
        },
        model::analytics::DEFAULT_MOST_PLACED,
        service::analytics::AnalyticsService,
        state::AppState,
    },
};

/// Tag for grouping reporting endpoints in OpenAPI documentation
pub static ANALYTICS_TAG: &str = "analytics";

/// Totals of books, readers and genres with books added in the last 7 and 30 days.
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Catalog summary", body = CatalogSummaryDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_summary(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ViewAnalytics])
        .await?;

    let summary = AnalyticsService::new(&state.db).summary().await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

/// Share of each catalogued genre across active books; genres missing from the genre
/// list are folded into "Others".
#[utoipa::path(
    get,
    path = "/api/analytics/genres",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Genre distribution", body = Vec<GenreShareDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_genre_distribution(
    State(state): State<AppState>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ViewAnalytics])
        .await?;

    let shares = AnalyticsService::new(&state.db).genre_distribution().await?;
    let shares_dto: Vec<_> = shares.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(shares_dto)))
}

/// Books placed most often across all readers.
///
/// When fewer books were ever placed than requested, random active books with zero
/// placements fill the list.
#[utoipa::path(
    get,
    path = "/api/analytics/most-placed",
    tag = ANALYTICS_TAG,
    params(MostPlacedQuery),
    responses(
        (status = 200, description = "Most placed books", body = Vec<MostPlacedDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not permitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_most_placed(
    State(state): State<AppState>,
    Query(query): Query<MostPlacedQuery>,
    request: TokenJson<NoPayload>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens)
        .require(request.token(), &[Action::ViewAnalytics])
        .await?;

    let most_placed = AnalyticsService::new(&state.db)
        .most_placed(query.limit.unwrap_or(DEFAULT_MOST_PLACED))
        .await?;
    let most_placed_dto: Vec<_> = most_placed.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(most_placed_dto)))
}
