//! User Routes - a user's sessions, companions and bookmarks

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::application::DEFAULT_SESSION_LIMIT;
use crate::auth::Identity;
use crate::error::ApiError;
use crate::models::{companion_responses, CompanionResponse, SessionListParams};
use crate::AppState;

/// Companions from a user's sessions, newest first
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/sessions",
    params(
        ("user_id" = String, Path, description = "User ID"),
        SessionListParams
    ),
    responses(
        (status = 200, description = "Session companions, newest first", body = Vec<CompanionResponse>),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "User"
)]
pub async fn user_sessions(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(user_id): Path<String>,
    Query(params): Query<SessionListParams>,
) -> Result<Json<Vec<CompanionResponse>>, ApiError> {
    let companions = state
        .companion_service
        .get_user_sessions(&ctx, &user_id, params.limit.unwrap_or(DEFAULT_SESSION_LIMIT))
        .await?;

    Ok(Json(companion_responses(companions)))
}

/// Companions authored by a user
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/companions",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Authored companions", body = Vec<CompanionResponse>),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "User"
)]
pub async fn user_companions(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<CompanionResponse>>, ApiError> {
    let companions = state
        .companion_service
        .get_user_companions(&ctx, &user_id)
        .await?;

    Ok(Json(companion_responses(companions)))
}

/// Companions a user bookmarked, newest bookmark first
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/bookmarks",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Bookmarked companions", body = Vec<CompanionResponse>),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "User"
)]
pub async fn user_bookmarks(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<CompanionResponse>>, ApiError> {
    let companions = state
        .companion_service
        .get_bookmarked_companions(&ctx, &user_id)
        .await?;

    Ok(Json(companion_responses(companions)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users/:user_id/sessions", get(user_sessions))
        .route("/api/users/:user_id/companions", get(user_companions))
        .route("/api/users/:user_id/bookmarks", get(user_bookmarks))
}
